/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;
use rust_leads_api::classifier::{quality_tier, score_bar_proportion, score_tier, Tier};
use rust_leads_api::date_normalizer::normalize_date;
use rust_leads_api::filter_pipeline::{filter_records, FilterOutcome};
use rust_leads_api::models::{LeadFields, LeadRecord};
use rust_leads_api::record_matcher::{account_id, is_blank, matches_account};
use serde_json::{json, Value};

fn record(id: usize, fields: Vec<(&str, Value)>) -> LeadRecord {
    LeadRecord {
        record_id: format!("rec{}", id),
        fields: fields.into_iter().collect::<LeadFields>(),
    }
}

// Property: date normalization is idempotent
proptest! {
    #[test]
    fn normalized_dates_are_fixed_points(
        year in 1970i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        offset_hours in -12i32..=14
    ) {
        let sign = if offset_hours < 0 { '-' } else { '+' };
        let input = format!(
            "{:04}-{:02}-{:02}T{:02}:00:00{}{:02}:00",
            year, month, day, hour, sign, offset_hours.abs()
        );
        let once = normalize_date(&input).unwrap();
        let twice = normalize_date(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn date_normalization_never_panics(input in "\\PC*") {
        let _ = normalize_date(&input);
    }
}

// Property: the classifier is total
proptest! {
    #[test]
    fn every_score_has_a_tier(score in proptest::num::f64::ANY) {
        let tier = score_tier(score);
        prop_assert!(Tier::ALL.contains(&tier));
        let width = score_bar_proportion(score);
        prop_assert!((0.0..=100.0).contains(&width));
    }

    #[test]
    fn every_label_has_a_tier(label in "\\PC*") {
        let tier = quality_tier(Some(&label));
        prop_assert!(Tier::ALL.contains(&tier));
    }

    #[test]
    fn score_tiers_are_monotonic(a in -1000.0f64..1000.0, b in -1000.0f64..1000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(score_tier(high) <= score_tier(low));
    }
}

// Property: account matching
proptest! {
    #[test]
    fn account_match_ignores_target_case(stored in "[A-Za-z0-9]{1,12}") {
        let r = record(0, vec![("Name", json!("Lead")), ("Account ID", json!(stored.clone()))]);
        prop_assert!(matches_account(&r, &stored.to_uppercase()));
        prop_assert!(matches_account(&r, &stored.to_lowercase()));
        prop_assert_eq!(
            matches_account(&r, &stored.to_uppercase()),
            matches_account(&r, &stored.to_lowercase())
        );
    }

    #[test]
    fn first_alias_always_wins(a in "[a-z]{1,8}", b in "[A-Z]{1,8}") {
        let r = record(0, vec![("AccountID", json!(b.clone())), ("Account ID", json!(a.clone()))]);
        prop_assert_eq!(account_id(&r), Some(a));
    }

    #[test]
    fn any_score_keeps_a_record(score in -1000i64..1000) {
        let r = record(0, vec![("Lead Score", json!(score))]);
        prop_assert!(!is_blank(&r));
    }
}

// Property: the pipeline never reorders
proptest! {
    #[test]
    fn surviving_records_keep_input_order(
        rows in proptest::collection::vec((proptest::bool::ANY, proptest::bool::ANY), 0..30)
    ) {
        let input: Vec<LeadRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, (populated, ours))| {
                let mut fields = vec![("Account ID", json!(if *ours { "ACC" } else { "other" }))];
                if *populated {
                    fields.push(("Name", json!(format!("lead {}", i))));
                }
                record(i, fields)
            })
            .collect();

        let expected: Vec<String> = rows
            .iter()
            .enumerate()
            .filter(|(_, (populated, ours))| *populated && *ours)
            .map(|(i, _)| format!("rec{}", i))
            .collect();

        match filter_records(input, "acc") {
            FilterOutcome::Matched(found) => {
                let ids: Vec<String> = found.into_iter().map(|r| r.record_id).collect();
                prop_assert_eq!(ids, expected);
            }
            FilterOutcome::NoResults => prop_assert!(expected.is_empty()),
        }
    }
}
