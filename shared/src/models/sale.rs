//! POS sale payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Invoice;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Credit,
    Mixed,
}

impl PaymentMethod {
    /// Methods the point of sale accepts
    pub const POS: [PaymentMethod; 3] = [Self::Cash, Self::Card, Self::Mixed];

    pub fn is_pos_accepted(&self) -> bool {
        Self::POS.contains(self)
    }

    /// Label printed on documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Card => "Tarjeta",
            Self::Transfer => "Transferencia",
            Self::Credit => "Crédito",
            Self::Mixed => "Mixto",
        }
    }
}

/// Invoice type; a POS sale with ITBIS is fiscal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceType {
    Fiscal,
    NonFiscal,
}

/// One sale line as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub discount: Decimal,
}

/// Body of `POST /sales/pos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePosSaleRequest {
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItemInput>,
    /// General (cart-level) discount
    pub discount: Decimal,
    pub include_tax: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_received: Option<Decimal>,
}

/// Response of `POST /sales/pos`
///
/// The back office wraps the invoice with change data only when the request
/// carried `amountReceived`; otherwise the body is the bare invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CreatedSaleBody")]
pub struct CreatedSale {
    #[serde(rename = "invoice")]
    pub sale: Invoice,
    #[serde(rename = "change")]
    pub change_amount: Option<Decimal>,
    pub amount_received: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedSaleBody {
    Wrapped {
        invoice: Invoice,
        #[serde(default)]
        change: Option<Decimal>,
        #[serde(default, rename = "amountReceived")]
        amount_received: Option<Decimal>,
    },
    Bare(Invoice),
}

impl From<CreatedSaleBody> for CreatedSale {
    fn from(body: CreatedSaleBody) -> Self {
        match body {
            CreatedSaleBody::Wrapped {
                invoice,
                change,
                amount_received,
            } => Self {
                sale: invoice,
                change_amount: change,
                amount_received,
            },
            CreatedSaleBody::Bare(sale) => Self {
                sale,
                change_amount: None,
                amount_received: None,
            },
        }
    }
}
