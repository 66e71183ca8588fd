use crate::models::LeadRecord;
use crate::record_matcher::{is_blank, matches_account};

/// Result of filtering one response.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// At least one populated record for the account, in source order.
    Matched(Vec<LeadRecord>),
    /// Nothing survived. Not an error.
    NoResults,
}

impl FilterOutcome {
    pub fn len(&self) -> usize {
        match self {
            FilterOutcome::Matched(records) => records.len(),
            FilterOutcome::NoResults => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drops blank rows, then keeps rows belonging to `account_id`.
///
/// The two steps always run in this order and never reorder records.
pub fn filter_records(records: Vec<LeadRecord>, account_id: &str) -> FilterOutcome {
    let total = records.len();

    let populated: Vec<LeadRecord> = records.into_iter().filter(|r| !is_blank(r)).collect();
    let blank = total - populated.len();

    let matched: Vec<LeadRecord> = populated
        .into_iter()
        .filter(|r| matches_account(r, account_id))
        .collect();

    tracing::debug!(
        "Filtered {} records: {} blank, {} matched account",
        total,
        blank,
        matched.len()
    );

    if matched.is_empty() {
        FilterOutcome::NoResults
    } else {
        FilterOutcome::Matched(matched)
    }
}
