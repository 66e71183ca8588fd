//! Per-record predicates: blank detection and account matching.
//!
//! Remote rows have no fixed schema, so each semantic field is resolved
//! through a short, ordered list of accepted key spellings. The first key
//! holding a value (not null, not an empty string) wins.

use crate::models::{LeadFields, LeadRecord};
use serde_json::Value;

/// Accepted spellings of the account identifier, in priority order.
pub const ACCOUNT_ID_ALIASES: &[&str] = &["Account ID", "AccountID", "Account_ID"];

/// Semantic fields of a lead row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Date,
    Name,
    LeadQuality,
    LeadScore,
    Suggestion,
    AccountId,
}

impl LeadField {
    /// Fields whose emptiness makes a row blank.
    pub const DISPLAY: [LeadField; 5] = [
        LeadField::Date,
        LeadField::Name,
        LeadField::LeadQuality,
        LeadField::LeadScore,
        LeadField::Suggestion,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            LeadField::Date => &["Date"],
            LeadField::Name => &["Name"],
            LeadField::LeadQuality => &["Lead Quality"],
            LeadField::LeadScore => &["Lead Score"],
            LeadField::Suggestion => &["Suggestion"],
            LeadField::AccountId => ACCOUNT_ID_ALIASES,
        }
    }
}

impl LeadFields {
    /// Value stored under the first alias of `field` that holds one.
    ///
    /// Keys are matched case-sensitively; an explicit `null` or `""` counts
    /// as absent, so a later alias can still supply the value.
    pub fn lookup(&self, field: LeadField) -> Option<&Value> {
        field
            .aliases()
            .iter()
            .find_map(|key| self.get(key).filter(|value| !is_absent(value)))
    }

    /// Field value rendered as text, see [`value_to_text`].
    pub fn text(&self, field: LeadField) -> Option<String> {
        self.lookup(field).and_then(value_to_text)
    }

    /// Numeric field value. Numeric strings such as `"85"` are accepted.
    pub fn number(&self, field: LeadField) -> Option<f64> {
        match self.lookup(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Renders a scalar JSON value as text.
///
/// Integral numbers drop the fractional part (`42.0` → `42`); arrays, as
/// returned for lookup and link columns, are joined with `,`. Objects and
/// nulls have no text form.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_to_text(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| value_to_text(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

fn number_to_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Whether a display field carries something worth showing.
///
/// `Lead Score` is populated whenever it is a number, zero included.
fn is_populated(field: LeadField, value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => field == LeadField::LeadScore || n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The account identifier of a row, from the first alias holding a value.
pub fn account_id(record: &LeadRecord) -> Option<String> {
    record.fields.text(LeadField::AccountId)
}

/// True when none of the five display fields is populated.
pub fn is_blank(record: &LeadRecord) -> bool {
    !LeadField::DISPLAY.iter().any(|field| {
        record
            .fields
            .lookup(*field)
            .is_some_and(|value| is_populated(*field, value))
    })
}

/// Case-insensitive exact match of the row's account identifier.
///
/// The stored value is not trimmed. A row with no account alias never matches.
pub fn matches_account(record: &LeadRecord, target: &str) -> bool {
    let target = target.to_lowercase();
    account_id(record).is_some_and(|stored| stored.to_lowercase() == target)
}
