//! Invoice and credit note actions: list, load, void, credit, print

use std::collections::HashMap;

use pos_client::{ClientError, SalesApi};
use pos_printer::{PaperWidth, PrintableDocument, Printer, ReceiptTicket};
use rust_decimal::Decimal;
use shared::Paginated;
use shared::error::ErrorCode;
use shared::models::{
    CancelInvoiceResponse, CompanyProfile, CreateCreditNoteRequest, CreatedCreditNote, CreditNote,
    Invoice, InvoiceFilter, InvoiceSummary, SaleItemInput,
};

use crate::checkout::CheckoutReceipt;
use crate::error::{SalesError, SalesResult};
use crate::logger::AUDIT_TARGET;

pub(crate) const INVOICE: &str = "Invoice";
pub(crate) const CREDIT_NOTE: &str = "Credit note";

pub(crate) fn lookup_error(
    resource: &'static str,
    id: &str,
) -> impl FnOnce(ClientError) -> SalesError {
    move |err| {
        if err.is_not_found() {
            SalesError::not_found(resource, id)
        } else {
            SalesError::Remote(err)
        }
    }
}

pub async fn load_invoices(
    api: &dyn SalesApi,
    filter: &InvoiceFilter,
) -> SalesResult<Paginated<InvoiceSummary>> {
    Ok(api.list_invoices(filter).await?)
}

pub async fn load_invoice(api: &dyn SalesApi, id: &str) -> SalesResult<Invoice> {
    api.get_invoice(id).await.map_err(lookup_error(INVOICE, id))
}

pub async fn load_credit_note(api: &dyn SalesApi, id: &str) -> SalesResult<CreditNote> {
    api.get_credit_note(id).await.map_err(lookup_error(CREDIT_NOTE, id))
}

/// Void an invoice; a non-blank reason is mandatory
pub async fn void_invoice(
    api: &dyn SalesApi,
    id: &str,
    reason: &str,
) -> SalesResult<CancelInvoiceResponse> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(SalesError::validation(
            ErrorCode::VoidReasonRequired,
            "Debe indicar el motivo de la anulación",
        ));
    }

    let response = api
        .cancel_invoice(id, reason)
        .await
        .map_err(lookup_error(INVOICE, id))?;

    tracing::info!(
        target: AUDIT_TARGET,
        invoice = %id,
        reason = %reason,
        status = ?response.invoice.status,
        "invoice voided"
    );
    Ok(response)
}

/// Issue a credit note against an invoice
///
/// The invoice must exist and not be voided, and the quantity credited per
/// product may not exceed what that invoice billed.
pub async fn create_credit_note(
    api: &dyn SalesApi,
    request: &CreateCreditNoteRequest,
) -> SalesResult<CreatedCreditNote> {
    if request.invoice_id.trim().is_empty() {
        return Err(SalesError::validation(
            ErrorCode::ValidationFailed,
            "Debe seleccionar una factura",
        ));
    }
    let reason = request.reason.trim();
    if reason.is_empty() {
        return Err(SalesError::validation(
            ErrorCode::CreditNoteReasonRequired,
            "El motivo es obligatorio",
        ));
    }
    if request.items.is_empty() {
        return Err(SalesError::validation(
            ErrorCode::CreditNoteItemsRequired,
            "Debe agregar al menos un item",
        ));
    }
    if let Some(item) = request.items.iter().find(|i| i.quantity <= Decimal::ZERO) {
        return Err(SalesError::validation(
            ErrorCode::ValueOutOfRange,
            format!("La cantidad de \"{}\" debe ser mayor que cero", item.description),
        ));
    }

    let invoice = load_invoice(api, &request.invoice_id).await?;
    if invoice.is_cancelled() {
        return Err(SalesError::precondition(
            ErrorCode::InvoiceAlreadyCancelled,
            "No se puede crear una nota de crédito para una factura anulada",
        ));
    }
    check_credited_quantities(&invoice, &request.items)?;

    let request = CreateCreditNoteRequest {
        reason: reason.to_string(),
        ..request.clone()
    };
    let created = api
        .create_credit_note(&request)
        .await
        .map_err(lookup_error(INVOICE, &request.invoice_id))?;

    tracing::info!(
        target: AUDIT_TARGET,
        credit_note = %created.number,
        invoice = %invoice.number,
        total = %created.total,
        reason = %reason,
        "credit note issued"
    );
    Ok(created)
}

/// Running credited quantity per product against the invoiced quantity
fn check_credited_quantities(invoice: &Invoice, items: &[SaleItemInput]) -> SalesResult<()> {
    let mut invoiced: HashMap<&str, Decimal> = HashMap::new();
    for line in &invoice.items {
        if let Some(product_id) = line.product_id.as_deref() {
            *invoiced.entry(product_id).or_default() += line.quantity;
        }
    }

    let mut credited: HashMap<&str, Decimal> = HashMap::new();
    for item in items {
        let Some(product_id) = item.product_id.as_deref() else {
            continue;
        };
        let total = credited.entry(product_id).or_default();
        *total += item.quantity;

        let limit = invoiced.get(product_id).copied().unwrap_or_default();
        if *total > limit {
            return Err(SalesError::validation(
                ErrorCode::CreditNoteExceedsInvoice,
                format!(
                    "La cantidad a acreditar para \"{}\" ({:.2}) excede la cantidad de la factura original ({:.2})",
                    item.description, total, limit
                ),
            ));
        }
    }
    Ok(())
}

/// Load an invoice and render it for printing
pub async fn print_invoice(
    api: &dyn SalesApi,
    id: &str,
    company: &CompanyProfile,
) -> SalesResult<PrintableDocument> {
    let invoice = load_invoice(api, id).await?;
    let document = pos_printer::render_invoice(&invoice, company);
    tracing::debug!(invoice = %invoice.number, bytes = document.html.len(), "invoice rendered");
    Ok(document)
}

/// Load a credit note and render it for printing
pub async fn print_credit_note(
    api: &dyn SalesApi,
    id: &str,
    company: &CompanyProfile,
) -> SalesResult<PrintableDocument> {
    let note = load_credit_note(api, id).await?;
    let document = pos_printer::render_credit_note(&note, company);
    tracing::debug!(
        credit_note = %note.number,
        bytes = document.html.len(),
        "credit note rendered"
    );
    Ok(document)
}

/// Send the sale ticket to a receipt printer
pub async fn print_ticket<P: Printer>(
    printer: &P,
    receipt: &CheckoutReceipt,
    company: &CompanyProfile,
    width: PaperWidth,
) -> SalesResult<()> {
    let data = ReceiptTicket::new(company, &receipt.sale)
        .with_cash(receipt.amount_received, receipt.change)
        .render(width);

    printer.send(&data).await.map_err(|e| {
        tracing::warn!(invoice = %receipt.sale.number, error = %e, "ticket not printed");
        SalesError::from(e)
    })
}
