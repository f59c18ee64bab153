//! Invoice Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Client, EntityRef, InvoiceType, PaymentMethod};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Borrador",
            Self::Issued => "Emitida",
            Self::Paid => "Pagada",
            Self::Overdue => "Vencida",
            Self::Cancelled => "Anulada",
        }
    }
}

/// Catalog projection embedded in document lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProduct {
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
}

/// Invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product: Option<ItemProduct>,
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub subtotal: Decimal,
}

impl InvoiceItem {
    /// Catalog name when linked to a product, free-text description otherwise
    pub fn display_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(&self.description)
    }
}

/// Invoice detail (`GET /sales/invoices/{id}`, and the sale inside `POST /sales/pos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    /// Fiscal receipt number (NCF); absent on non-fiscal invoices
    #[serde(default)]
    pub ncf: Option<String>,
    #[serde(rename = "type", default)]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subtotal: Decimal,
    /// ITBIS
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub cancelled_by_user: Option<EntityRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn is_cancelled(&self) -> bool {
        self.status == Some(InvoiceStatus::Cancelled)
    }
}

/// Row of `GET /sales/cancelled`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledInvoice {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
    pub total: Decimal,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub cancelled_by: Option<EntityRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Query for `GET /sales/cancelled`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledInvoiceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// `YYYY-MM-DD`, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive through end of day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Row of `GET /sales/invoices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub branch: Option<EntityRef>,
    pub status: InvoiceStatus,
    #[serde(rename = "type", default)]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub total: Decimal,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Query for `GET /sales/invoices`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// `YYYY-MM-DD`, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body of `POST /sales/invoices/{id}/cancel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelInvoiceRequest {
    pub reason: String,
}

/// Status projection returned after a void
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceStatusRef {
    pub id: String,
    pub status: InvoiceStatus,
}

/// Response of `POST /sales/invoices/{id}/cancel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelInvoiceResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub invoice: InvoiceStatusRef,
}
