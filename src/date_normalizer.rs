//! Turns an operator-supplied date into the `YYYY-MM-DD` key used by the
//! remote equality filter.
//!
//! Values without an offset are read in the local timezone and converted to
//! UTC, so a value close to midnight in a non-UTC locale can land on the
//! neighbouring calendar day. That approximation is intentional.

use crate::errors::SearchError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only formats interpreted as local midnight.
const LOCAL_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%b %d, %Y", "%B %d, %Y", "%Y/%m/%d"];

/// Normalizes `input` to `YYYY-MM-DD` (UTC calendar date).
///
/// Fails with [`SearchError::InvalidInput`] when nothing recognizable is found.
pub fn normalize_date(input: &str) -> Result<String, SearchError> {
    normalize_date_in(input, &Local)
}

/// Same as [`normalize_date`] with an explicit local timezone.
pub fn normalize_date_in<Tz: TimeZone>(input: &str, local: &Tz) -> Result<String, SearchError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(SearchError::InvalidInput);
    }

    // ISO date-only values are UTC dates already, which keeps this idempotent.
    if let Ok(date) = NaiveDate::parse_from_str(raw, CANONICAL_FORMAT) {
        return Ok(date.format(CANONICAL_FORMAT).to_string());
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(to_utc_key(&instant.with_timezone(&Utc)));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local_to_utc_key(naive, local);
        }
    }

    for format in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return local_to_utc_key(midnight, local);
            }
        }
    }

    tracing::debug!("Unparseable date input: {:?}", raw);
    Err(SearchError::InvalidInput)
}

fn local_to_utc_key<Tz: TimeZone>(naive: NaiveDateTime, local: &Tz) -> Result<String, SearchError> {
    // Ambiguous local times (DST fall-back) take the earlier instant; skipped ones are invalid.
    local
        .from_local_datetime(&naive)
        .earliest()
        .map(|instant| to_utc_key(&instant.with_timezone(&Utc)))
        .ok_or(SearchError::InvalidInput)
}

fn to_utc_key(instant: &DateTime<Utc>) -> String {
    instant.date_naive().format(CANONICAL_FORMAT).to_string()
}
