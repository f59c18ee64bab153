//! Credit Note Model (nota de crédito)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Client, ItemProduct, SaleItemInput};

/// Invoice a credit note refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRef {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
}

/// Row of `GET /sales/credit-notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNoteSummary {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    #[serde(default)]
    pub invoice: Option<InvoiceRef>,
    pub total: Decimal,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub reason: String,
}

/// Credit note line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNoteItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product: Option<ItemProduct>,
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub subtotal: Decimal,
}

impl CreditNoteItem {
    pub fn display_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(&self.description)
    }
}

/// Credit note detail (`GET /sales/credit-notes/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNote {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    #[serde(default)]
    pub invoice: Option<InvoiceRef>,
    pub reason: String,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub items: Vec<CreditNoteItem>,
}

impl CreditNote {
    /// Customer of the credited invoice, if the payload embeds it
    pub fn client(&self) -> Option<&Client> {
        self.invoice.as_ref().and_then(|i| i.client.as_ref())
    }
}

/// Query for `GET /sales/credit-notes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNoteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

/// Body of `POST /sales/credit-notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditNoteRequest {
    pub invoice_id: String,
    pub reason: String,
    pub items: Vec<SaleItemInput>,
}

/// Response of `POST /sales/credit-notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedCreditNote {
    pub id: String,
    pub number: String,
    #[serde(default)]
    pub ncf: Option<String>,
    pub total: Decimal,
}
