//! Printable HTML documents
//!
//! Self-contained pages the desktop shell opens in a print window or saves
//! to disk. Company branding comes from the `CompanyProfile` passed in.

use rust_decimal::Decimal;
use shared::models::{Client, CompanyProfile, CreditNote, Invoice, InvoiceItem, InvoiceType, Quote};
use shared::util::{format_date_long, format_money};

use crate::html::escape;

/// Rendered document ready to print or download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableDocument {
    /// Window title
    pub title: String,
    /// Suggested download name
    pub file_name: String,
    pub html: String,
}

const STYLE: &str = r#"
  @media print { body { margin: 0; } }
  body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; color: #333; }
  .company { text-align: center; margin-bottom: 20px; }
  .company h2 { margin: 0; }
  .company p { margin: 2px 0; color: #666; font-size: 12px; }
  .header { display: flex; justify-content: space-between; border-bottom: 2px solid #333; padding-bottom: 15px; margin-bottom: 25px; }
  .header h1 { margin: 0; font-size: 26px; }
  .header p { margin: 4px 0; }
  .section { margin-bottom: 22px; }
  .section-title { font-weight: bold; border-bottom: 1px solid #ddd; padding-bottom: 4px; margin-bottom: 8px; }
  .info-label { font-weight: bold; color: #666; font-size: 12px; text-transform: uppercase; }
  table { width: 100%; border-collapse: collapse; }
  th, td { padding: 6px 8px; border-bottom: 1px solid #eee; text-align: left; }
  .text-right { text-align: right; }
  .totals { width: 320px; margin-left: auto; }
  .totals .final td { font-weight: bold; font-size: 18px; border-top: 2px solid #333; }
  .badge { display: inline-block; padding: 2px 10px; border-radius: 10px; background: #e0e7ff; font-size: 12px; }
  .reason { background: #fff7ed; border-left: 4px solid #f97316; padding: 10px 14px; margin-bottom: 22px; }
  .footer { margin-top: 36px; padding-top: 16px; border-top: 1px solid #ddd; text-align: center; font-size: 12px; color: #666; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

fn company_block(company: &CompanyProfile) -> String {
    let mut html = format!(
        "<div class=\"company\">\n<h2>{}</h2>\n",
        escape(&company.name)
    );
    if let Some(tax_id) = &company.tax_id {
        html.push_str(&format!("<p>RNC: {}</p>\n", escape(tax_id)));
    }
    for extra in [&company.address, &company.phone, &company.email]
        .into_iter()
        .flatten()
    {
        html.push_str(&format!("<p>{}</p>\n", escape(extra)));
    }
    html.push_str("</div>\n");
    html
}

fn header(kind: &str, number: &str, ncf: Option<&str>, total: Decimal, date: &str) -> String {
    let ncf = ncf
        .map(|n| format!("<p>NCF: {}</p>\n", escape(n)))
        .unwrap_or_default();
    format!(
        "<div class=\"header\">\n<div>\n<h1>{kind}</h1>\n<p>Número: {}</p>\n{ncf}</div>\n<div class=\"text-right\">\n<h2>{}</h2>\n<p>Fecha: {date}</p>\n</div>\n</div>\n",
        escape(number),
        format_money(total),
    )
}

fn client_rows(client: &Client) -> String {
    let mut html = format!(
        "<p><span class=\"info-label\">Cliente</span> {}</p>\n",
        escape(&client.name)
    );
    let extras = [
        ("Identificación", &client.identification),
        ("Email", &client.email),
        ("Teléfono", &client.phone),
    ];
    for (label, value) in extras {
        if let Some(value) = value {
            html.push_str(&format!(
                "<p><span class=\"info-label\">{label}</span> {}</p>\n",
                escape(value)
            ));
        }
    }
    html
}

fn total_row(label: &str, value: &str) -> String {
    format!("<tr><td>{label}</td><td class=\"text-right\">{value}</td></tr>\n")
}

/// Line table with per-line discount (invoices and quotes)
fn items_table(items: &[InvoiceItem]) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n<div class=\"section-title\">Items</div>\n<table>\n<thead><tr><th>Descripción</th><th class=\"text-right\">Cantidad</th><th class=\"text-right\">Precio</th><th class=\"text-right\">Descuento</th><th class=\"text-right\">Subtotal</th></tr></thead>\n<tbody>\n",
    );
    for item in items {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"text-right\">{:.2}</td><td class=\"text-right\">{}</td><td class=\"text-right\">{}</td><td class=\"text-right\">{}</td></tr>\n",
            escape(item.display_name()),
            item.quantity,
            format_money(item.price),
            format_money(item.discount),
            format_money(item.subtotal),
        ));
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
    html
}

/// Letter-size invoice
pub fn render_invoice(invoice: &Invoice, company: &CompanyProfile) -> PrintableDocument {
    let date = invoice
        .issue_date
        .or(invoice.created_at)
        .map(format_date_long)
        .unwrap_or_default();

    let mut body = company_block(company);
    body.push_str(&header(
        "FACTURA",
        &invoice.number,
        invoice.ncf.as_deref(),
        invoice.total,
        &date,
    ));

    if let Some(client) = &invoice.client {
        body.push_str("<div class=\"section\">\n<div class=\"section-title\">Cliente</div>\n");
        body.push_str(&client_rows(client));
        body.push_str("</div>\n");
    }

    body.push_str(&items_table(&invoice.items));

    // Stored subtotal is net of the general discount
    body.push_str("<table class=\"totals\">\n");
    body.push_str(&total_row(
        "Subtotal:",
        &format_money(invoice.subtotal + invoice.discount),
    ));
    if invoice.discount > Decimal::ZERO {
        body.push_str(&total_row(
            "Descuento:",
            &format!("-{}", format_money(invoice.discount)),
        ));
    }
    body.push_str(&total_row("Subtotal Neto:", &format_money(invoice.subtotal)));
    if invoice.invoice_type == Some(InvoiceType::Fiscal) {
        body.push_str(&total_row("ITBIS (18%):", &format_money(invoice.tax)));
    }
    body.push_str(&format!(
        "<tr class=\"final\"><td>Total:</td><td class=\"text-right\">{}</td></tr>\n",
        format_money(invoice.total)
    ));
    if invoice.balance > Decimal::ZERO {
        body.push_str(&total_row(
            "Balance Pendiente:",
            &format_money(invoice.balance),
        ));
    }
    body.push_str("</table>\n");

    if let Some(observations) = &invoice.observations {
        body.push_str(&format!(
            "<div class=\"section\">\n<div class=\"section-title\">Observaciones</div>\n<p>{}</p>\n</div>\n",
            escape(observations)
        ));
    }

    body.push_str("<div class=\"footer\">\n");
    if let Some(method) = invoice.payment_method {
        body.push_str(&format!("<p>Método de Pago: {}</p>\n", method.label()));
    }
    if let Some(footer) = &company.footer {
        body.push_str(&format!("<p>{}</p>\n", escape(footer)));
    }
    body.push_str("</div>\n");

    let title = format!("Factura {}", invoice.number);
    PrintableDocument {
        html: page(&title, &body),
        file_name: format!("Factura-{}.html", invoice.number),
        title,
    }
}

/// Letter-size credit note
pub fn render_credit_note(note: &CreditNote, company: &CompanyProfile) -> PrintableDocument {
    let date = note
        .issue_date
        .or(note.created_at)
        .map(format_date_long)
        .unwrap_or_default();

    let mut body = company_block(company);
    body.push_str(&header(
        "NOTA DE CRÉDITO",
        &note.number,
        note.ncf.as_deref(),
        note.total,
        &date,
    ));

    if let Some(invoice) = &note.invoice {
        body.push_str(&format!(
            "<div class=\"section\">\n<div class=\"section-title\">Factura Relacionada</div>\n<p><span class=\"info-label\">Número de Factura</span> {}</p>\n",
            escape(&invoice.number)
        ));
        if let Some(ncf) = &invoice.ncf {
            body.push_str(&format!(
                "<p><span class=\"info-label\">NCF</span> {}</p>\n",
                escape(ncf)
            ));
        }
        if let Some(client) = &invoice.client {
            body.push_str(&client_rows(client));
        }
        body.push_str("</div>\n");
    }

    body.push_str(&format!(
        "<div class=\"reason\">\n<div class=\"section-title\">Motivo de la Nota de Crédito</div>\n<p>{}</p>\n</div>\n",
        escape(&note.reason)
    ));

    body.push_str(
        "<div class=\"section\">\n<div class=\"section-title\">Items</div>\n<table>\n<thead><tr><th>Descripción</th><th class=\"text-right\">Cantidad</th><th class=\"text-right\">Precio</th><th class=\"text-right\">Subtotal</th></tr></thead>\n<tbody>\n",
    );
    for item in &note.items {
        body.push_str(&format!(
            "<tr><td>{}</td><td class=\"text-right\">{:.2}</td><td class=\"text-right\">{}</td><td class=\"text-right\">{}</td></tr>\n",
            escape(item.display_name()),
            item.quantity,
            format_money(item.price),
            format_money(item.subtotal),
        ));
    }
    body.push_str("</tbody>\n</table>\n</div>\n");

    body.push_str("<table class=\"totals\">\n");
    body.push_str(&total_row("Subtotal:", &format_money(note.subtotal)));
    if note.tax > Decimal::ZERO {
        body.push_str(&total_row("ITBIS (18%):", &format_money(note.tax)));
    }
    body.push_str(&format!(
        "<tr class=\"final\"><td>Total:</td><td class=\"text-right\">{}</td></tr>\n",
        format_money(note.total)
    ));
    body.push_str("</table>\n");

    if let Some(footer) = &company.footer {
        body.push_str(&format!(
            "<div class=\"footer\">\n<p>{}</p>\n</div>\n",
            escape(footer)
        ));
    }

    let title = format!("Nota de Crédito {}", note.number);
    PrintableDocument {
        html: page(&title, &body),
        file_name: format!("NotaCredito-{}.html", note.number),
        title,
    }
}

/// Letter-size quote
pub fn render_quote(quote: &Quote, company: &CompanyProfile) -> PrintableDocument {
    let date = quote.created_at.map(format_date_long).unwrap_or_default();

    let mut body = company_block(company);
    body.push_str(&header("COTIZACIÓN", &quote.number, None, quote.total, &date));
    body.push_str(&format!(
        "<div class=\"section\">\n<span class=\"badge\">{}</span>\n",
        quote.status.label()
    ));
    if let Some(valid_until) = quote.valid_until {
        body.push_str(&format!(
            "<p><span class=\"info-label\">Válida hasta</span> {}</p>\n",
            format_date_long(valid_until)
        ));
    }
    body.push_str("</div>\n");

    if let Some(client) = &quote.client {
        body.push_str("<div class=\"section\">\n<div class=\"section-title\">Cliente</div>\n");
        body.push_str(&client_rows(client));
        body.push_str("</div>\n");
    }

    body.push_str(&items_table(&quote.items));

    body.push_str("<table class=\"totals\">\n");
    body.push_str(&total_row(
        "Subtotal:",
        &format_money(quote.subtotal + quote.discount),
    ));
    if quote.discount > Decimal::ZERO {
        body.push_str(&total_row(
            "Descuento:",
            &format!("-{}", format_money(quote.discount)),
        ));
    }
    body.push_str(&total_row("Subtotal Neto:", &format_money(quote.subtotal)));
    if quote.tax > Decimal::ZERO {
        body.push_str(&total_row("ITBIS (18%):", &format_money(quote.tax)));
    }
    body.push_str(&format!(
        "<tr class=\"final\"><td>Total:</td><td class=\"text-right\">{}</td></tr>\n",
        format_money(quote.total)
    ));
    body.push_str("</table>\n");

    if let Some(observations) = &quote.observations {
        body.push_str(&format!(
            "<div class=\"section\">\n<div class=\"section-title\">Observaciones</div>\n<p>{}</p>\n</div>\n",
            escape(observations)
        ));
    }
    if let Some(footer) = &company.footer {
        body.push_str(&format!(
            "<div class=\"footer\">\n<p>{}</p>\n</div>\n",
            escape(footer)
        ));
    }

    let title = format!("Cotización {}", quote.number);
    PrintableDocument {
        html: page(&title, &body),
        file_name: format!("Cotizacion-{}.html", quote.number.trim_start_matches('#')),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{CreditNoteItem, InvoiceRef, QuoteStatus};

    fn company() -> CompanyProfile {
        CompanyProfile {
            name: "Ferretería <Don Luis>".into(),
            tax_id: Some("131-12345-6".into()),
            address: Some("Av. Duarte 12, Santiago".into()),
            phone: None,
            email: None,
            footer: Some("Gracias por preferirnos".into()),
        }
    }

    fn invoice() -> Invoice {
        Invoice {
            id: "inv-1".into(),
            number: "FAC-000123".into(),
            ncf: Some("B0100000001".into()),
            invoice_type: Some(InvoiceType::Fiscal),
            status: None,
            issue_date: Some(Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).unwrap()),
            due_date: None,
            subtotal: Decimal::new(150, 0),
            tax: Decimal::new(27, 0),
            discount: Decimal::new(50, 0),
            total: Decimal::new(177, 0),
            balance: Decimal::ZERO,
            payment_method: Some(shared::models::PaymentMethod::Card),
            observations: Some("Entregar & cobrar".into()),
            client: None,
            items: vec![InvoiceItem {
                id: None,
                product_id: None,
                product: None,
                description: "Tornillos 1/2\"".into(),
                quantity: Decimal::new(4, 0),
                price: Decimal::new(50, 0),
                discount: Decimal::ZERO,
                subtotal: Decimal::new(200, 0),
            }],
            cancelled_at: None,
            cancellation_reason: None,
            cancelled_by_user: None,
            created_at: None,
        }
    }

    #[test]
    fn test_invoice_document() {
        let doc = render_invoice(&invoice(), &company());
        assert_eq!(doc.title, "Factura FAC-000123");
        assert_eq!(doc.file_name, "Factura-FAC-000123.html");

        let html = &doc.html;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Ferretería &lt;Don Luis&gt;"));
        assert!(html.contains("RNC: 131-12345-6"));
        assert!(html.contains("<p>NCF: B0100000001</p>"));
        assert!(html.contains("Fecha: 15 de enero de 2024"));
        assert!(html.contains("Tornillos 1/2&quot;"));
        assert!(html.contains("4.00"));
        // Gross subtotal = net + general discount
        assert!(html.contains("RD$200.00"));
        assert!(html.contains("-RD$50.00"));
        assert!(html.contains("ITBIS (18%):"));
        assert!(html.contains("RD$177.00"));
        assert!(html.contains("Entregar &amp; cobrar"));
        assert!(html.contains("Método de Pago: Tarjeta"));
        assert!(!html.contains("Balance Pendiente"));
    }

    #[test]
    fn test_non_fiscal_invoice_hides_tax() {
        let mut invoice = invoice();
        invoice.invoice_type = Some(InvoiceType::NonFiscal);
        invoice.balance = Decimal::new(77, 0);

        let html = render_invoice(&invoice, &company()).html;
        assert!(!html.contains("ITBIS"));
        assert!(html.contains("Balance Pendiente:"));
    }

    #[test]
    fn test_credit_note_document() {
        let note = CreditNote {
            id: "cn-1".into(),
            number: "NC-0007".into(),
            ncf: None,
            invoice: Some(InvoiceRef {
                id: "inv-1".into(),
                number: "FAC-000123".into(),
                ncf: Some("B0100000001".into()),
                client: None,
            }),
            reason: "Devolución <parcial>".into(),
            issue_date: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()),
            subtotal: Decimal::new(100, 0),
            tax: Decimal::ZERO,
            total: Decimal::new(100, 0),
            items: vec![CreditNoteItem {
                product_id: None,
                product: None,
                description: "Martillo".into(),
                quantity: Decimal::ONE,
                price: Decimal::new(100, 0),
                subtotal: Decimal::new(100, 0),
            }],
        };

        let doc = render_credit_note(&note, &company());
        assert_eq!(doc.file_name, "NotaCredito-NC-0007.html");
        assert!(doc.html.contains("NOTA DE CRÉDITO"));
        assert!(doc.html.contains("FAC-000123"));
        assert!(doc.html.contains("Devolución &lt;parcial&gt;"));
        assert!(doc.html.contains("Fecha: 1 de febrero de 2024"));
        assert!(doc.html.contains("Martillo"));
        assert!(!doc.html.contains("ITBIS"));
    }

    #[test]
    fn test_quote_document() {
        let quote = Quote {
            id: "q-1".into(),
            number: "#COT-0004".into(),
            status: QuoteStatus::Open,
            client: Some(Client {
                id: "c-1".into(),
                name: "Ana Gómez".into(),
                identification: Some("001-0000000-1".into()),
                phone: None,
                email: Some("ana@example.com".into()),
                is_active: true,
            }),
            items: invoice().items,
            subtotal: Decimal::new(180, 0),
            tax: Decimal::ZERO,
            discount: Decimal::new(20, 0),
            total: Decimal::new(180, 0),
            valid_until: Some(Utc.with_ymd_and_hms(2024, 3, 31, 16, 0, 0).unwrap()),
            observations: None,
            converted_to_invoice_id: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap()),
        };

        let doc = render_quote(&quote, &company());
        assert_eq!(doc.title, "Cotización #COT-0004");
        assert_eq!(doc.file_name, "Cotizacion-COT-0004.html");
        assert!(doc.html.contains("COTIZACIÓN"));
        assert!(doc.html.contains("<span class=\"badge\">Abierta</span>"));
        assert!(doc.html.contains("Válida hasta</span> 31 de marzo de 2024"));
        assert!(doc.html.contains("001-0000000-1"));
        assert!(doc.html.contains("Tornillos 1/2&quot;"));
        assert!(doc.html.contains("-RD$20.00"));
        assert!(!doc.html.contains("ITBIS"));
        assert!(!doc.html.contains("NCF:"));
    }
}
