use crate::errors::SearchError;
use crate::models::*;
use crate::presentation::{lead_view, results_summary};
use crate::search::{LeadSearch, SearchOutcome, SearchRequest};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Lead searcher; runs one search at a time.
    pub search: LeadSearch,
}

/// Routes that are never rate limited.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// Lead search routes; the server wraps these in the rate limiter.
pub fn search_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1/leads/search", get(search_leads))
}

#[derive(OpenApi)]
#[openapi(
    paths(health, search_leads),
    components(schemas(
        SearchResponse,
        SearchErrorBody,
        LeadView,
        QualityView,
        ScoreView,
        BadgeStyle
    )),
    tags((name = "leads", description = "Lead lookup by date and account"))
)]
pub struct ApiDoc;

/// Health check endpoint.
///
/// Returns the service status and version.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-leads-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/leads/search?date=YYYY-MM-DD&account_id=X
///
/// Looks up the leads created on `date` for `account_id`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameters with the date and account identifier.
///
/// # Returns
///
/// * `Result<Json<SearchResponse>, SearchError>` - Matched leads (or a
///   no-results notice), or one of the fixed search error categories.
#[utoipa::path(
    get,
    path = "/api/v1/leads/search",
    tag = "leads",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "Matched leads or a no-results notice", body = SearchResponse),
        (status = 400, description = "Missing or invalid input", body = SearchErrorBody),
        (status = 409, description = "Another search is in progress", body = SearchErrorBody),
        (status = 429, description = "Remote rate limit hit", body = SearchErrorBody),
        (status = 502, description = "Remote failure or misconfiguration", body = SearchErrorBody)
    )
)]
pub async fn search_leads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResponse>, SearchError> {
    tracing::info!(
        "GET /leads/search - date: {:?}, account_id: {:?}",
        params.date,
        params.account_id
    );

    let request = SearchRequest {
        date: params.date,
        account_id: params.account_id,
    };

    let response = match state.search.search(&request).await? {
        SearchOutcome::Success(records) => {
            let leads: Vec<LeadView> = records.iter().map(lead_view).collect();
            SearchResponse::Success {
                count: leads.len(),
                summary: results_summary(leads.len()),
                leads,
            }
        }
        SearchOutcome::NoResults => SearchResponse::NoResults {
            message: SearchOutcome::NO_RESULTS_MESSAGE.to_string(),
        },
    };

    Ok(Json(response))
}
