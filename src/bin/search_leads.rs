//! Runs one lead search from the command line and prints the matches.
//!
//! Usage: `search_leads <date> <account-id>`

use rust_leads_api::aitable_client::AitableClient;
use rust_leads_api::config::Config;
use rust_leads_api::presentation::{lead_view, results_summary, PLACEHOLDER};
use rust_leads_api::search::{LeadSearch, SearchOutcome, SearchRequest};
use std::env;
use std::process::ExitCode;

/// Main entry point for the search utility.
///
/// Exits with 0 on success or no results, 1 on any search error.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    rust_leads_api::init_tracing("rust_leads_api=warn");

    let mut args = env::args().skip(1);
    let request = SearchRequest {
        date: args.next(),
        account_id: args.next(),
    };

    let config = Config::from_env()?;
    let client = AitableClient::from_config(&config)?;
    let search = LeadSearch::new(client);

    match search.search(&request).await {
        Ok(SearchOutcome::Success(records)) => {
            println!(
                "{:<14} {:<24} {:<12} {:>7}  {}",
                "Date", "Name", "Quality", "Score", "Suggestion"
            );
            for record in &records {
                let view = lead_view(record);
                let quality = view
                    .quality
                    .map(|q| format!("{} (T{})", q.label, q.tier))
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let score = view
                    .score
                    .map(|s| format!("{} (T{})", s.value, s.tier))
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                println!(
                    "{:<14} {:<24} {:<12} {:>7}  {}",
                    view.date, view.name, quality, score, view.suggestion
                );
            }
            println!();
            println!("{}", results_summary(records.len()));
            Ok(ExitCode::SUCCESS)
        }
        Ok(SearchOutcome::NoResults) => {
            println!("{}", SearchOutcome::NO_RESULTS_MESSAGE);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
