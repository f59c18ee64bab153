//! Cart Pricing Engine
//!
//! Synchronous cart state for one POS session. Mutators taking a line id
//! return `true` when a line changed and `false` for unknown ids.

mod line;
mod totals;


pub use line::CartLine;
pub use totals::{CartTotals, TAX_RATE};

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Actor, InvoiceType, PaymentMethod, Product, SaleItemInput};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    general_discount: Decimal,
    tax_enabled: bool,
    payment_method: PaymentMethod,
    amount_received: Option<Decimal>,
    client_id: Option<String>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Lines ==========

    /// Add one unit of `product`
    pub fn add_line(&mut self, product: &Product) {
        match self.line_mut(&product.id) {
            Some(line) => {
                line.quantity += Decimal::ONE;
                line.recompute();
            }
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn set_quantity(&mut self, line_id: &str, quantity: Decimal) -> bool {
        if quantity <= Decimal::ZERO {
            return self.remove_line(line_id);
        }
        match self.line_mut(line_id) {
            Some(line) => {
                line.quantity = quantity;
                line.recompute();
                true
            }
            None => false,
        }
    }

    pub fn set_line_discount(&mut self, line_id: &str, amount: Decimal) -> bool {
        match self.line_mut(line_id) {
            Some(line) => {
                line.discount = amount.max(Decimal::ZERO);
                line.recompute();
                true
            }
            None => false,
        }
    }

    /// Override a line's unit price; only administrators and supervisors
    pub fn set_line_price(&mut self, line_id: &str, price: Decimal, actor: &Actor) -> bool {
        if !actor.can_edit_prices() {
            tracing::debug!(actor = %actor.id, role = ?actor.role, "price edit ignored");
            return false;
        }
        match self.line_mut(line_id) {
            Some(line) => {
                line.unit_price = price.max(Decimal::ZERO);
                line.recompute();
                true
            }
            None => false,
        }
    }

    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != line_id);
        self.lines.len() != before
    }

    fn line_mut(&mut self, line_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == line_id)
    }

    // ========== Cart-level settings ==========

    pub fn set_general_discount(&mut self, amount: Decimal) {
        self.general_discount = amount.max(Decimal::ZERO);
    }

    pub fn set_tax_enabled(&mut self, enabled: bool) {
        self.tax_enabled = enabled;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn set_amount_received(&mut self, amount: Option<Decimal>) {
        self.amount_received = amount.map(|a| a.max(Decimal::ZERO));
    }

    pub fn set_client(&mut self, client_id: Option<String>) {
        self.client_id = client_id.filter(|id| !id.trim().is_empty());
    }

    /// New sale: drop lines and restore every setting to its default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ========== Read access ==========

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn general_discount(&self) -> Decimal {
        self.general_discount
    }

    pub fn tax_enabled(&self) -> bool {
        self.tax_enabled
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn amount_received(&self) -> Option<Decimal> {
        self.amount_received
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn compute_totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines, self.general_discount, self.tax_enabled)
    }

    /// A sale with ITBIS is fiscal
    pub fn invoice_type(&self) -> InvoiceType {
        if self.tax_enabled {
            InvoiceType::Fiscal
        } else {
            InvoiceType::NonFiscal
        }
    }

    pub(crate) fn sale_items(&self) -> Vec<SaleItemInput> {
        self.lines.iter().map(CartLine::to_sale_item).collect()
    }
}
