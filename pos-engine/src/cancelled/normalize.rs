use chrono::{DateTime, Utc};
use shared::models::{CancelledInvoice, CreditNoteSummary};
use shared::util::business_offset;

use super::{CancelledDocument, CancelledFilter, DocumentKind};

impl From<CancelledInvoice> for CancelledDocument {
    fn from(invoice: CancelledInvoice) -> Self {
        let effective_date = invoice
            .cancelled_at
            .or(invoice.created_at)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            id: invoice.id,
            document_number: invoice.number,
            fiscal_number: invoice.ncf,
            total_amount: invoice.total,
            effective_date,
            reason_text: invoice.cancellation_reason.unwrap_or_default(),
            source_kind: DocumentKind::CancelledInvoice,
            original_document_ref: None,
            client_name: invoice.client.map(|c| c.name),
            actor_name: invoice.cancelled_by.map(|u| u.name),
        }
    }
}

impl From<CreditNoteSummary> for CancelledDocument {
    fn from(note: CreditNoteSummary) -> Self {
        let effective_date = note.issue_date.unwrap_or(note.created_at);
        let (original_document_ref, client_name) = match note.invoice {
            Some(invoice) => (Some(invoice.number), invoice.client.map(|c| c.name)),
            None => (None, None),
        };

        Self {
            id: note.id,
            document_number: note.number,
            fiscal_number: note.ncf,
            total_amount: note.total,
            effective_date,
            reason_text: note.reason,
            source_kind: DocumentKind::CreditNote,
            original_document_ref,
            client_name,
            actor_name: None,
        }
    }
}

/// Apply the filters the credit-note endpoint ignores
///
/// The actor filter only concerns voided invoices; credit notes pass it.
pub(super) fn credit_note_matches(note: &CreditNoteSummary, filter: &CancelledFilter) -> bool {
    let day = note
        .issue_date
        .unwrap_or(note.created_at)
        .with_timezone(&business_offset())
        .date_naive();

    if filter.start_date.is_some_and(|start| day < start) {
        return false;
    }
    if filter.end_date.is_some_and(|end| day > end) {
        return false;
    }

    match filter.reason.as_deref().map(str::trim) {
        Some(reason) if !reason.is_empty() => note
            .reason
            .to_lowercase()
            .contains(&reason.to_lowercase()),
        _ => true,
    }
}
