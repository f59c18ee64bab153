//! Cancelled-Documents Aggregator
//!
//! Voided invoices and credit notes live behind two independently paginated
//! endpoints. The history view shows them as one list ordered by effective
//! date, so both sources are read in full, merged, sorted and re-paginated
//! locally.
//!
//! A single server-side merged endpoint would avoid reading full result
//! sets; until the back office offers one, the source walk is bounded by
//! [`MAX_SOURCE_PAGES`]. A page built from a cut-short walk carries
//! `truncated: true`.

mod history;
mod normalize;


pub use history::{CancelledHistory, HistoryLoad};

use chrono::{DateTime, NaiveDate, Utc};
use pos_client::SalesApi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::PageQuery;
use shared::error::ErrorCode;
use shared::models::{CancelledInvoice, CancelledInvoiceQuery, CreditNoteQuery, CreditNoteSummary};

use crate::error::{SalesError, SalesResult};

/// Rows requested per source page
pub const SOURCE_PAGE_SIZE: u32 = 100;

/// Upper bound on pages read from one source per fetch
pub const MAX_SOURCE_PAGES: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    CancelledInvoice,
    CreditNote,
}

/// One row of the cancelled-documents history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledDocument {
    pub id: String,
    pub document_number: String,
    /// NCF
    pub fiscal_number: Option<String>,
    pub total_amount: Decimal,
    pub effective_date: DateTime<Utc>,
    pub reason_text: String,
    pub source_kind: DocumentKind,
    /// Number of the invoice a credit note reverses
    pub original_document_ref: Option<String>,
    pub client_name: Option<String>,
    /// Who voided the invoice
    pub actor_name: Option<String>,
}

/// History filters
///
/// Dates are business-local calendar days, both ends inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    /// User id of whoever voided the invoice
    pub cancelled_by: Option<String>,
    pub reason: Option<String>,
}

impl CancelledFilter {
    fn search_text(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn invoice_query(&self) -> CancelledInvoiceQuery {
        CancelledInvoiceQuery {
            search: self.search_text(),
            start_date: self.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: self.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            cancelled_by: self.cancelled_by.clone().filter(|s| !s.trim().is_empty()),
            reason: self.reason.clone().filter(|s| !s.trim().is_empty()),
        }
    }

    fn credit_note_query(&self) -> CreditNoteQuery {
        CreditNoteQuery {
            search: self.search_text(),
            invoice_id: None,
        }
    }
}

/// One page of the merged history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledPage {
    pub items: Vec<CancelledDocument>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    /// A source hit [`MAX_SOURCE_PAGES`]; older documents are missing
    pub truncated: bool,
}

/// Rows read from one source
struct SourceRows<T> {
    rows: Vec<T>,
    truncated: bool,
}

async fn fetch_cancelled_invoices(
    api: &dyn SalesApi,
    query: &CancelledInvoiceQuery,
) -> SalesResult<SourceRows<CancelledInvoice>> {
    let mut rows = Vec::new();
    for page in 1..=MAX_SOURCE_PAGES {
        let batch = api
            .list_cancelled_invoices(query, PageQuery::new(page, SOURCE_PAGE_SIZE))
            .await?;
        let more = batch.pagination.has_next() && !batch.data.is_empty();
        rows.extend(batch.data);
        if !more {
            return Ok(SourceRows {
                rows,
                truncated: false,
            });
        }
    }
    tracing::warn!(rows = rows.len(), "cancelled invoices truncated at page limit");
    Ok(SourceRows {
        rows,
        truncated: true,
    })
}

async fn fetch_credit_notes(
    api: &dyn SalesApi,
    query: &CreditNoteQuery,
) -> SalesResult<SourceRows<CreditNoteSummary>> {
    let mut rows = Vec::new();
    for page in 1..=MAX_SOURCE_PAGES {
        let batch = api
            .list_credit_notes(query, PageQuery::new(page, SOURCE_PAGE_SIZE))
            .await?;
        let more = batch.pagination.has_next() && !batch.data.is_empty();
        rows.extend(batch.data);
        if !more {
            return Ok(SourceRows {
                rows,
                truncated: false,
            });
        }
    }
    tracing::warn!(rows = rows.len(), "credit notes truncated at page limit");
    Ok(SourceRows {
        rows,
        truncated: true,
    })
}

/// Fetch page `page` (1-based) of the merged cancelled-documents history
///
/// Both sources are queried concurrently; either failing fails the call.
pub async fn fetch_page(
    api: &dyn SalesApi,
    filter: &CancelledFilter,
    page: u32,
    page_size: u32,
) -> SalesResult<CancelledPage> {
    if page_size == 0 {
        return Err(SalesError::validation(
            ErrorCode::ValueOutOfRange,
            "El tamaño de página debe ser mayor que cero",
        ));
    }

    let invoice_query = filter.invoice_query();
    let note_query = filter.credit_note_query();
    let (invoices, notes) = tokio::try_join!(
        fetch_cancelled_invoices(api, &invoice_query),
        fetch_credit_notes(api, &note_query),
    )?;

    tracing::debug!(
        invoices = invoices.rows.len(),
        credit_notes = notes.rows.len(),
        page,
        page_size,
        "merging cancelled documents"
    );

    let truncated = invoices.truncated || notes.truncated;
    let mut merged: Vec<CancelledDocument> = invoices
        .rows
        .into_iter()
        .map(CancelledDocument::from)
        .collect();
    merged.extend(
        notes
            .rows
            .into_iter()
            .filter(|note| normalize::credit_note_matches(note, filter))
            .map(CancelledDocument::from),
    );

    let mut result = paginate(merged, page, page_size);
    result.truncated = truncated;
    Ok(result)
}

/// Sort newest first (ties by id) and slice out one page
///
/// `page < 1` is treated as the first page.
pub fn paginate(
    mut documents: Vec<CancelledDocument>,
    page: u32,
    page_size: u32,
) -> CancelledPage {
    documents.sort_by(|a, b| {
        b.effective_date
            .cmp(&a.effective_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let page = page.max(1);
    let total = documents.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size as usize) as u32
    };
    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let items = documents
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    CancelledPage {
        items,
        page,
        page_size,
        total: total as u64,
        total_pages,
        truncated: false,
    }
}
