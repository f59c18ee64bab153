//! Cart line

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Product, SaleItemInput};

/// One product in the cart; identified by its product id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub code: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
    /// `quantity * unit_price - discount`, not clamped
    pub subtotal: Decimal,
}

impl CartLine {
    pub(crate) fn from_product(product: &Product) -> Self {
        let mut line = Self {
            product_id: product.id.clone(),
            code: product.code.clone(),
            description: product.name.clone(),
            quantity: Decimal::ONE,
            unit_price: product.sale_price.max(Decimal::ZERO),
            discount: Decimal::ZERO,
            subtotal: Decimal::ZERO,
        };
        line.recompute();
        line
    }

    pub(crate) fn recompute(&mut self) {
        self.subtotal = self.quantity * self.unit_price - self.discount;
    }

    pub(crate) fn to_sale_item(&self) -> SaleItemInput {
        SaleItemInput {
            product_id: Some(self.product_id.clone()),
            description: self.description.clone(),
            quantity: self.quantity,
            price: self.unit_price,
            discount: self.discount,
        }
    }
}
