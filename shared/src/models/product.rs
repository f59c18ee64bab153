//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntityRef, default_true};

/// Product entity as listed by the inventory endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub code: String,
    pub name: String,
    pub sale_price: Decimal,
    /// Aggregated stock, when the listing includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// Case-insensitive match on name or code
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.code.to_lowercase().contains(&query)
    }
}

/// Query for `GET /inventory/products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Stock row for one product at one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product_id: String,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub branch: Option<EntityRef>,
    pub quantity: Decimal,
    #[serde(default)]
    pub min_stock: Option<Decimal>,
}
