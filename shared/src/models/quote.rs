//! Quote Model (cotización)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Client, InvoiceItem, InvoiceStatus, InvoiceType, PaymentMethod, SaleItemInput};

/// Quote status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Open,
    Accepted,
    Rejected,
    Converted,
}

impl QuoteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Abierta",
            Self::Accepted => "Aceptada",
            Self::Rejected => "Rechazada",
            Self::Converted => "Convertida",
        }
    }
}

/// Row of `GET /sales/quotes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub client: Option<Client>,
    pub status: QuoteStatus,
    pub total: Decimal,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Quote detail (`GET /sales/quotes/{id}`)
///
/// Lines share the invoice line shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub number: String,
    pub status: QuoteStatus,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub converted_to_invoice_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn is_open(&self) -> bool {
        self.status == QuoteStatus::Open
    }
}

/// Query for `GET /sales/quotes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body of `POST /sales/quotes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub items: Vec<SaleItemInput>,
    pub discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub include_tax: bool,
}

/// Response of `POST /sales/quotes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedQuote {
    pub id: String,
    pub number: String,
    pub total: Decimal,
    pub status: QuoteStatus,
}

/// Body of `POST /sales/quotes/{id}/convert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertQuoteRequest {
    pub payment_method: PaymentMethod,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Default for ConvertQuoteRequest {
    /// Back-office defaults: a fiscal invoice on credit
    fn default() -> Self {
        Self {
            payment_method: PaymentMethod::Credit,
            invoice_type: InvoiceType::Fiscal,
            due_date: None,
        }
    }
}

/// Invoice projection returned by `POST /sales/quotes/{id}/convert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedInvoice {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    pub total: Decimal,
    #[serde(default)]
    pub balance: Decimal,
    pub status: InvoiceStatus,
}
