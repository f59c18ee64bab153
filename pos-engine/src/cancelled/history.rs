use parking_lot::Mutex;
use pos_client::SalesApi;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{CancelledFilter, CancelledPage, fetch_page};
use crate::error::SalesResult;

/// Outcome of a history load
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryLoad {
    /// Latest request; the page is now the current view
    Applied(CancelledPage),
    /// A newer load started meanwhile; result discarded
    Stale,
}

/// Cancelled-documents view state
///
/// Every load takes a ticket from a monotonic sequence. Only the completion
/// holding the latest ticket may replace the current page, so a slow
/// response never overwrites a newer one.
#[derive(Debug)]
pub struct CancelledHistory {
    seq: AtomicU64,
    page_size: u32,
    current: Mutex<Option<CancelledPage>>,
}

impl CancelledHistory {
    pub fn new(page_size: u32) -> Self {
        Self {
            seq: AtomicU64::new(0),
            page_size,
            current: Mutex::new(None),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page currently shown, if any load has been applied
    pub fn current(&self) -> Option<CancelledPage> {
        self.current.lock().clone()
    }

    pub async fn load(
        &self,
        api: &dyn SalesApi,
        filter: &CancelledFilter,
        page: u32,
    ) -> SalesResult<HistoryLoad> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = fetch_page(api, filter, page, self.page_size).await;

        let mut current = self.current.lock();
        let latest = self.seq.load(Ordering::SeqCst);
        if latest != ticket {
            tracing::debug!(ticket, latest, "discarding stale history load");
            return Ok(HistoryLoad::Stale);
        }

        let page = result?;
        *current = Some(page.clone());
        Ok(HistoryLoad::Applied(page))
    }
}
