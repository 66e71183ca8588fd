//! Lead Lookup API Library
//!
//! Looks up the leads created on a given date for a given account in an
//! AITable datasheet, drops blank rows, and annotates each match with
//! quality/score tiers for display.
//!
//! # Modules
//!
//! - `aitable_client`: AITable datasheet API client.
//! - `classifier`: Quality and score tiers.
//! - `config`: Configuration management.
//! - `date_normalizer`: Operator date → `YYYY-MM-DD` query key.
//! - `errors`: Internal and operator-facing error types.
//! - `filter_pipeline`: Blank-row suppression and account filtering.
//! - `handlers`: HTTP request handlers and OpenAPI document.
//! - `models`: Remote and API data models.
//! - `presentation`: Badge styles and display formatting.
//! - `record_matcher`: Per-record field lookup and predicates.
//! - `search`: Search orchestration and error mapping.

pub mod aitable_client;
pub mod classifier;
pub mod config;
pub mod date_normalizer;
pub mod errors;
pub mod filter_pipeline;
pub mod handlers;
pub mod models;
pub mod presentation;
pub mod record_matcher;
pub mod search;

/// Installs the global tracing subscriber (env filter + fmt layer).
///
/// `default_filter` applies when `RUST_LOG` is unset.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
