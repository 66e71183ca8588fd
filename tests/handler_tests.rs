/// HTTP handler tests
/// Drives the router with `oneshot` and checks status codes and JSON bodies
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_leads_api::aitable_client::AitableClient;
use rust_leads_api::handlers::{self, AppState};
use rust_leads_api::search::LeadSearch;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create an app pointing at the mock server
fn create_test_app(base_url: String) -> Router {
    let client = AitableClient::new(
        base_url,
        "dstTest".to_string(),
        "test_token".to_string(),
        "date".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();

    let state = Arc::new(AppState {
        search: LeadSearch::new(client),
    });

    handlers::public_routes()
        .merge(handlers::search_routes())
        .with_state(state)
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app("http://127.0.0.1:9".to_string());
    let (status, body) = call(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "rust-leads-api");
}

#[tokio::test]
async fn test_search_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datasheets/dstTest/records"))
        .and(query_param("filter", "date=2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"records": [
                {
                    "recordId": "rec1",
                    "fields": {
                        "Date": "2024-01-01",
                        "Name": "Alice",
                        "Lead Quality": "Good",
                        "Lead Score": 65,
                        "Account ID": "X1"
                    }
                },
                {"recordId": "rec2", "fields": {}}
            ]}
        })))
        .mount(&mock_server)
        .await;

    let app = create_test_app(mock_server.uri());
    let (status, body) = call(app, "/api/v1/leads/search?date=2024-01-01&account_id=x1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 1);
    assert_eq!(body["summary"], "Found 1 lead for the selected date");

    let lead = &body["leads"][0];
    assert_eq!(lead["record_id"], "rec1");
    assert_eq!(lead["date"], "Jan 1, 2024");
    assert_eq!(lead["name"], "Alice");
    assert_eq!(lead["suggestion"], "—");
    assert_eq!(lead["quality"]["tier"], 2);
    assert_eq!(lead["score"]["tier"], 2);
    assert_eq!(lead["score"]["bar_width_percent"], 65.0);
}

#[tokio::test]
async fn test_search_no_results_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"records": []}})))
        .mount(&mock_server)
        .await;

    let app = create_test_app(mock_server.uri());
    let (status, body) = call(app, "/api/v1/leads/search?date=2024-01-01&account_id=Z9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "no_results");
    assert_eq!(
        body["message"],
        "No leads found for the selected date and Account ID combination."
    );
}

#[tokio::test]
async fn test_search_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_test_app(mock_server.uri());

    let (status, body) = call(app.clone(), "/api/v1/leads/search?account_id=X1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_date");
    assert_eq!(body["message"], "Please select a date before searching.");

    let (status, body) = call(app.clone(), "/api/v1/leads/search?date=2024-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_account_id");

    let (status, body) = call(app, "/api/v1/leads/search?date=someday&account_id=X1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_search_remote_errors() {
    let cases = [
        (429, StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
        (404, StatusCode::BAD_GATEWAY, "not_found_or_misconfigured"),
        (503, StatusCode::BAD_GATEWAY, "unknown"),
    ];

    for (remote_status, expected_status, expected_code) in cases {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(remote_status).set_body_string("secret detail"))
            .mount(&mock_server)
            .await;

        let app = create_test_app(mock_server.uri());
        let (status, body) = call(app, "/api/v1/leads/search?date=2024-01-01&account_id=X1").await;

        assert_eq!(status, expected_status);
        assert_eq!(body["error"], expected_code);
        assert!(!body.to_string().contains("secret detail"));
    }
}

#[tokio::test]
async fn test_query_values_are_url_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("filter", "date=2024-01-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"records": [
                {"recordId": "rec1", "fields": {"Name": "Eve", "Account ID": "ACC 7"}}
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(mock_server.uri());
    let (status, body) = call(
        app,
        "/api/v1/leads/search?date=2024-01-05T10%3A00%3A00Z&account_id=acc%207",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["leads"][0]["name"], "Eve");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app("http://127.0.0.1:9".to_string());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/leads")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
