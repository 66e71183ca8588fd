use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rust_leads_api::aitable_client::AitableClient;
use rust_leads_api::config::Config;
use rust_leads_api::handlers::{self, ApiDoc, AppState};
use rust_leads_api::search::LeadSearch;

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the AITable client and
/// the lead searcher, then serves the HTTP API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rust_leads_api::init_tracing("rust_leads_api=debug,tower_http=debug");

    // Load configuration
    let config = Config::from_env()?;

    let client = AitableClient::from_config(&config)?;
    tracing::info!("✓ AITable client initialized: {}", config.aitable_base_url);

    let app_state = Arc::new(AppState {
        search: LeadSearch::new(client),
    });

    // Configure rate limiter: 5 requests/second per IP, burst of 10
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(10)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let protected_routes = handlers::search_routes().layer(
        ServiceBuilder::new()
            // Searches carry no body; keep the limit small
            .layer(RequestBodyLimitLayer::new(64 * 1024))
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    // Health check and docs bypass rate limiting
    let app = handlers::public_routes()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
