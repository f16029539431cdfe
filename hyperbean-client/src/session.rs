use std::sync::Arc;

use hyperbean_common::{BeansPage, CoffeeBean, PaginationInfo, Result};

use crate::clock::Clock;
use crate::ledger::{compute_stats, LatencyLedger, LatencyProbe, LedgerStats};
use crate::pager::{page_window, PageEntry};
use crate::Client;

/// An accepted page change. `seq` orders requests so a stale response can be
/// recognized and discarded (last-request-wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub page: u32,
}

/// Client-side view state for the bean grid: the displayed beans, the
/// current pagination metadata, and the latency ledger fed by page fetches.
///
/// Page changes go through an explicit request/apply cycle. Between the two,
/// the previously displayed beans stay in place and [`PageSession::is_loading`]
/// reports `true`; a display layer substitutes [`PageSession::skeleton_count`]
/// placeholder slots for the grid while it waits.
pub struct PageSession {
    beans: Vec<CoffeeBean>,
    pagination: PaginationInfo,
    ledger: LatencyLedger,
    issued_seq: u64,
    in_flight: Option<PageRequest>,
}

impl PageSession {
    /// Start a session from the initially rendered page.
    pub fn new(
        initial_beans: Vec<CoffeeBean>,
        initial_pagination: PaginationInfo,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            beans: initial_beans,
            pagination: initial_pagination,
            ledger: LatencyLedger::new(clock),
            issued_seq: 0,
            in_flight: None,
        }
    }

    pub fn beans(&self) -> &[CoffeeBean] {
        &self.beans
    }

    pub fn pagination(&self) -> PaginationInfo {
        self.pagination
    }

    pub fn ledger(&self) -> &LatencyLedger {
        &self.ledger
    }

    /// Reset the latency ledger. Idempotent.
    pub fn clear_ledger(&mut self) {
        self.ledger.clear();
    }

    /// `true` while a page change is waiting on the network.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Placeholder slots to draw while loading, one per expected item.
    pub fn skeleton_count(&self) -> u32 {
        self.pagination.per_page
    }

    /// Summary statistics over the ledger's current contents.
    pub fn stats(&self) -> LedgerStats {
        compute_stats(&self.ledger.snapshot())
    }

    /// Pager labels for the current pagination state.
    pub fn page_window(&self) -> Vec<PageEntry> {
        page_window(self.pagination.current_page, self.pagination.total_pages)
    }

    /// Accept a page change, or `None` when `page` is already current or
    /// outside `[1, total_pages]`. A silent no-op, matching a pager whose
    /// prev/next arrows run past the ends.
    pub fn request_page(&mut self, page: u32) -> Option<PageRequest> {
        if page == self.pagination.current_page || page < 1 || page > self.pagination.total_pages {
            return None;
        }
        self.issued_seq += 1;
        let request = PageRequest { seq: self.issued_seq, page };
        self.in_flight = Some(request);
        Some(request)
    }

    /// Apply a successful fetch for `request`: the beans and pagination are
    /// replaced wholesale and one sample lands in the ledger. Returns `false`
    /// when a newer request has been issued since: the stale response is
    /// discarded and nothing changes.
    pub fn apply_success(&mut self, request: PageRequest, total_ms: u64, response: BeansPage) -> bool {
        if request.seq != self.issued_seq {
            return false;
        }
        self.in_flight = None;
        self.beans = response.beans;
        self.pagination = response.pagination;
        self.ledger.append(LatencyProbe {
            total_ms,
            db_ms: response.db_duration_ms,
            is_hyperdrive: response.is_using_hyperdrive,
        });
        true
    }

    /// Record a failed fetch for `request`. The loading flag clears (if the
    /// request is still the newest); beans, pagination, and ledger are left
    /// exactly as they were.
    pub fn apply_failure(&mut self, request: PageRequest) {
        if request.seq == self.issued_seq {
            self.in_flight = None;
        }
    }

    /// Request `page`, fetch it through `client`, and apply the outcome.
    /// `Ok(false)` means the change was a no-op or the response was stale;
    /// errors surface to the caller for a transient notification and leave
    /// the session untouched.
    pub async fn change_page(&mut self, client: &Client, page: u32) -> Result<bool> {
        let Some(request) = self.request_page(page) else {
            return Ok(false);
        };
        match client.fetch_beans_page(page).await {
            Ok(fetch) => Ok(self.apply_success(request, fetch.total_ms, fetch.page)),
            Err(e) => {
                self.apply_failure(request);
                Err(e)
            }
        }
    }
}
