use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

// ============ Remote Models ============

/// Free-form field map of one datasheet row.
///
/// The remote source does not guarantee a schema, so keys are arbitrary
/// strings and values arbitrary JSON. Semantic access goes through
/// [`crate::record_matcher::LeadField`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadFields(pub BTreeMap<String, Value>);

impl LeadFields {
    /// Raw, case-sensitive lookup of a single key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for LeadFields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A lead row as returned by the datasheet API.
///
/// A missing or `null` field map decodes as empty, so the row is dropped as
/// blank instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Opaque row identifier, assumed unique within one response.
    #[serde(rename = "recordId", default, deserialize_with = "null_as_default")]
    pub record_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: LeadFields,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ data?: { records?: LeadRecord[] } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsEnvelope {
    #[serde(default)]
    pub data: Option<RecordsPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsPage {
    #[serde(default)]
    pub records: Option<Vec<LeadRecord>>,
}

impl RecordsEnvelope {
    /// Missing `data` or `records` is an empty record set, not an error.
    pub fn into_records(self) -> Vec<LeadRecord> {
        self.data.and_then(|page| page.records).unwrap_or_default()
    }
}

// ============ API Models ============

/// Query parameters of `GET /api/v1/leads/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQueryParams {
    /// Calendar date the leads were created on (e.g. `2024-01-05`).
    pub date: Option<String>,
    /// Account identifier, matched case-insensitively.
    pub account_id: Option<String>,
}

/// Badge colours for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BadgeStyle {
    pub background_color: String,
    pub color: String,
    pub border_color: String,
}

/// Quality column of a rendered lead.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QualityView {
    pub label: String,
    /// 1 (strongest) to 4 (weakest).
    pub tier: u8,
    pub badge: BadgeStyle,
}

/// Score column of a rendered lead.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreView {
    /// Unclamped score as stored.
    pub value: f64,
    /// 1 (strongest) to 4 (weakest).
    pub tier: u8,
    pub badge: BadgeStyle,
    /// Bar width in percent, capped at 100.
    pub bar_width_percent: f64,
    pub bar_color: String,
}

/// One matched lead, ready for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeadView {
    pub record_id: String,
    /// `Jan 5, 2024`, the raw value if unparseable, or `—`.
    pub date: String,
    pub name: String,
    pub quality: Option<QualityView>,
    pub score: Option<ScoreView>,
    pub suggestion: String,
}

/// Body of a successful search.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResponse {
    Success {
        count: usize,
        summary: String,
        leads: Vec<LeadView>,
    },
    NoResults {
        message: String,
    },
}

/// Error body shared by every failed search.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchErrorBody {
    /// Category code, e.g. `rate_limited`.
    pub error: String,
    pub message: String,
}
