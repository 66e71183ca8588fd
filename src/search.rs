//! One lead search, end to end.
//!
//! 1. Validate inputs (no network access on failure)
//! 2. Normalize the date
//! 3. Fetch that day's records (single request, no retry)
//! 4. Drop blank rows, keep the account's rows
//!
//! Remote failures are folded into [`SearchError`] here and nowhere else.

use crate::aitable_client::AitableClient;
use crate::date_normalizer::normalize_date;
use crate::errors::SearchError;
use crate::filter_pipeline::{filter_records, FilterOutcome};
use crate::models::LeadRecord;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Operator input for one search.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub date: Option<String>,
    pub account_id: Option<String>,
}

impl SearchRequest {
    pub fn new(date: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            account_id: Some(account_id.into()),
        }
    }
}

/// Successful search result.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Matched leads in source order.
    Success(Vec<LeadRecord>),
    /// The query worked but nothing matched.
    NoResults,
}

impl SearchOutcome {
    pub const NO_RESULTS_MESSAGE: &'static str =
        "No leads found for the selected date and Account ID combination.";

    pub fn records(&self) -> &[LeadRecord] {
        match self {
            SearchOutcome::Success(records) => records,
            SearchOutcome::NoResults => &[],
        }
    }
}

/// `Idle → Searching → {Success, NoResults, Failed} → Idle`
///
/// Terminal phases describe the last finished search; the searcher is idle
/// again once it reports one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SearchPhase {
    Idle = 0,
    Searching = 1,
    Success = 2,
    NoResults = 3,
    Failed = 4,
}

impl SearchPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SearchPhase::Searching,
            2 => SearchPhase::Success,
            3 => SearchPhase::NoResults,
            4 => SearchPhase::Failed,
            _ => SearchPhase::Idle,
        }
    }
}

/// Runs lead searches against one datasheet, one at a time.
pub struct LeadSearch {
    client: AitableClient,
    busy: AtomicBool,
    phase: AtomicU8,
}

/// Clears the busy flag when the search ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl LeadSearch {
    pub fn new(client: AitableClient) -> Self {
        Self {
            client,
            busy: AtomicBool::new(false),
            phase: AtomicU8::new(SearchPhase::Idle as u8),
        }
    }

    /// Phase of the current or most recent search.
    pub fn phase(&self) -> SearchPhase {
        SearchPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn set_phase(&self, phase: SearchPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    /// Runs one search.
    ///
    /// Input problems are reported before any network access, in this order:
    /// `MissingDate`, `MissingAccountId`, `InvalidInput`. A call made while
    /// another search is in flight fails with `Busy` and issues no request.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let date = non_blank(request.date.as_deref()).ok_or(SearchError::MissingDate)?;
        let account_id =
            non_blank(request.account_id.as_deref()).ok_or(SearchError::MissingAccountId)?;
        let date_key = normalize_date(date)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("⏭ Search for {} rejected: another search in flight", date_key);
            return Err(SearchError::Busy);
        }
        let _guard = BusyGuard(&self.busy);
        self.set_phase(SearchPhase::Searching);

        tracing::info!("=== Lead search: date={} account={} ===", date_key, account_id);

        let records = match self.client.fetch_records_by_date(&date_key).await {
            Ok(records) => records,
            Err(e) => {
                // Raw detail stays in the logs
                tracing::error!("✗ Error fetching leads: {}", e);
                self.set_phase(SearchPhase::Failed);
                return Err(SearchError::from(&e));
            }
        };

        match filter_records(records, account_id) {
            FilterOutcome::Matched(found) => {
                tracing::info!("✓ {} leads matched account {}", found.len(), account_id);
                self.set_phase(SearchPhase::Success);
                Ok(SearchOutcome::Success(found))
            }
            FilterOutcome::NoResults => {
                tracing::info!("No leads for {} on {}", account_id, date_key);
                self.set_phase(SearchPhase::NoResults);
                Ok(SearchOutcome::NoResults)
            }
        }
    }
}

/// Leading/trailing whitespace is ignored; a whitespace-only value counts as missing.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
