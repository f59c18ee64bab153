//! POS sale ticket

use rust_decimal::Decimal;
use shared::models::{CompanyProfile, Invoice, PaymentMethod};
use shared::util::{format_amount, format_datetime, format_money};

use crate::escpos::EscPosBuilder;

/// Roll width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperWidth {
    /// 80 mm, 48 columns
    #[default]
    Mm80,
    /// 58 mm, 32 columns
    Mm58,
}

impl PaperWidth {
    pub fn columns(self) -> usize {
        match self {
            Self::Mm80 => 48,
            Self::Mm58 => 32,
        }
    }

    pub fn from_columns(columns: u32) -> Option<Self> {
        match columns {
            48 => Some(Self::Mm80),
            32 => Some(Self::Mm58),
            _ => None,
        }
    }
}

/// Receipt for a completed POS sale
#[derive(Debug, Clone)]
pub struct ReceiptTicket<'a> {
    company: &'a CompanyProfile,
    invoice: &'a Invoice,
    amount_received: Option<Decimal>,
    change: Option<Decimal>,
}

impl<'a> ReceiptTicket<'a> {
    pub fn new(company: &'a CompanyProfile, invoice: &'a Invoice) -> Self {
        Self {
            company,
            invoice,
            amount_received: None,
            change: None,
        }
    }

    /// Cash handed over and change returned
    pub fn with_cash(mut self, amount_received: Option<Decimal>, change: Option<Decimal>) -> Self {
        self.amount_received = amount_received;
        self.change = change;
        self
    }

    fn is_cash(&self) -> bool {
        self.invoice.payment_method == Some(PaymentMethod::Cash)
    }

    /// ESC/POS bytes, ending with a cut; cash sales also kick the drawer
    pub fn render(&self, width: PaperWidth) -> Vec<u8> {
        let mut b = EscPosBuilder::new(width.columns());
        let company = self.company;
        let invoice = self.invoice;

        // Header
        b.center().bold().double_height().line(&company.name).reset_size().bold_off();
        if let Some(tax_id) = &company.tax_id {
            b.line(&format!("RNC: {tax_id}"));
        }
        for extra in [&company.address, &company.phone].into_iter().flatten() {
            b.line(extra);
        }
        b.left().sep_double();

        b.line(&format!("Factura: {}", invoice.number));
        if let Some(ncf) = &invoice.ncf {
            b.line(&format!("NCF: {ncf}"));
        }
        if let Some(date) = invoice.issue_date.or(invoice.created_at) {
            b.line(&format!("Fecha: {}", format_datetime(date)));
        }
        if let Some(client) = &invoice.client {
            b.line(&format!("Cliente: {}", client.name));
        }
        b.sep_single();

        // Items
        for item in &invoice.items {
            b.line(item.display_name());
            b.line_lr(
                &format!("  {:.2} x {}", item.quantity, format_amount(item.price)),
                &format_amount(item.subtotal),
            );
            if item.discount > Decimal::ZERO {
                b.line_lr("  Descuento", &format!("-{}", format_amount(item.discount)));
            }
        }
        b.sep_single();

        // Totals
        b.line_lr("Subtotal", &format_money(invoice.subtotal));
        if invoice.discount > Decimal::ZERO {
            b.line_lr("Descuento", &format!("-{}", format_money(invoice.discount)));
        }
        if invoice.tax > Decimal::ZERO {
            b.line_lr("ITBIS (18%)", &format_money(invoice.tax));
        }
        b.bold().line_lr("TOTAL", &format_money(invoice.total)).bold_off();

        if let Some(method) = invoice.payment_method {
            b.line_lr("Pago", method.label());
        }
        if let Some(received) = self.amount_received {
            b.line_lr("Recibido", &format_money(received));
        }
        if let Some(change) = self.change {
            b.line_lr("Cambio", &format_money(change));
        }

        b.sep_double().center();
        b.line(company.footer.as_deref().unwrap_or("¡Gracias por su compra!"));

        if self.is_cash() {
            b.open_drawer();
        }
        b.cut_feed(4);
        b.build()
    }
}
