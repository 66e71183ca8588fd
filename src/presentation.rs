//! Display layer over the classifier: badge colours, score-bar colour and
//! text formatting for one matched lead.

use crate::classifier::{quality_tier, score_bar_proportion, score_tier, Tier};
use crate::models::{BadgeStyle, LeadRecord, LeadView, QualityView, ScoreView};
use crate::record_matcher::LeadField;
use chrono::{DateTime, NaiveDate};

pub const BRAND_COLOR: &str = "#ef631d";
pub const PLACEHOLDER: &str = "—";

/// Badge colours: brand orange at a tier-specific alpha.
pub fn badge_style(tier: Tier) -> BadgeStyle {
    let (background, border) = match tier {
        Tier::Strongest => ("0.2", "0.5"),
        Tier::Strong => ("0.15", "0.4"),
        Tier::Moderate => ("0.1", "0.3"),
        Tier::Weakest => ("0.05", "0.2"),
    };
    BadgeStyle {
        background_color: format!("rgba(239, 99, 29, {})", background),
        color: BRAND_COLOR.to_string(),
        border_color: format!("rgba(239, 99, 29, {})", border),
    }
}

pub fn score_bar_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Strongest => BRAND_COLOR,
        Tier::Strong => "rgba(239, 99, 29, 0.8)",
        Tier::Moderate => "rgba(239, 99, 29, 0.6)",
        Tier::Weakest => "rgba(239, 99, 29, 0.4)",
    }
}

/// `2024-01-05` → `Jan 5, 2024`. Unparseable dates are shown as stored.
pub fn format_display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        });
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `Found 1 lead for the selected date` / `Found 3 leads ...`
pub fn results_summary(count: usize) -> String {
    format!(
        "Found {} lead{} for the selected date",
        count,
        if count == 1 { "" } else { "s" }
    )
}

fn non_empty_text(record: &LeadRecord, field: LeadField) -> Option<String> {
    record.fields.text(field).filter(|s| !s.is_empty())
}

pub fn lead_view(record: &LeadRecord) -> LeadView {
    let quality = non_empty_text(record, LeadField::LeadQuality).map(|label| {
        let tier = quality_tier(Some(&label));
        QualityView {
            label,
            tier: tier.rank(),
            badge: badge_style(tier),
        }
    });

    let score = record
        .fields
        .number(LeadField::LeadScore)
        .map(|value| {
            let tier = score_tier(value);
            ScoreView {
                value,
                tier: tier.rank(),
                badge: badge_style(tier),
                bar_width_percent: score_bar_proportion(value),
                bar_color: score_bar_color(tier).to_string(),
            }
        });

    LeadView {
        record_id: record.record_id.clone(),
        date: non_empty_text(record, LeadField::Date)
            .map(|d| format_display_date(&d))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        name: non_empty_text(record, LeadField::Name).unwrap_or_else(|| PLACEHOLDER.to_string()),
        quality,
        score,
        suggestion: non_empty_text(record, LeadField::Suggestion)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}
