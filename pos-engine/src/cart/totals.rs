//! Cart totals
//!
//! Calculation order:
//! 1. items subtotal = Σ line subtotals
//! 2. after general discount = max(0, items subtotal - general discount)
//! 3. ITBIS = after general discount × 18%, rounded to cents
//! 4. final = after general discount + ITBIS

use rust_decimal::Decimal;
use serde::Serialize;
use shared::util::round_money;

use super::CartLine;

/// ITBIS rate (18%)
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub items_subtotal: Decimal,
    /// Σ per-line discounts (informational; already inside line subtotals)
    pub line_discounts: Decimal,
    pub general_discount: Decimal,
    pub total_after_general_discount: Decimal,
    pub tax: Decimal,
    pub final_total: Decimal,
}

impl CartTotals {
    pub fn compute(lines: &[CartLine], general_discount: Decimal, tax_enabled: bool) -> Self {
        let items_subtotal: Decimal = lines.iter().map(|l| l.subtotal).sum();
        let line_discounts: Decimal = lines.iter().map(|l| l.discount).sum();
        let total_after_general_discount = (items_subtotal - general_discount).max(Decimal::ZERO);
        let tax = if tax_enabled {
            round_money(total_after_general_discount * TAX_RATE)
        } else {
            Decimal::ZERO
        };

        Self {
            items_subtotal,
            line_discounts,
            general_discount,
            total_after_general_discount,
            tax,
            final_total: total_after_general_discount + tax,
        }
    }
}
