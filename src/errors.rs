use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Internal error types.
///
/// These carry raw detail for logs and have no HTTP rendering of their own.
/// They never reach an operator directly; the search orchestrator folds them
/// into [`SearchError`].
#[derive(Debug, Clone)]
pub enum AppError {
    /// The remote API answered with a non-success HTTP status.
    RemoteStatus {
        /// HTTP status code returned by the remote API.
        status: u16,
        /// Response body, kept for logging only.
        body: String,
    },
    /// Error interacting with an external API (connect, timeout, decoding).
    ExternalApiError(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::RemoteStatus { status, body } => {
                write!(f, "Remote API returned {}: {}", status, body)
            }
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

/// Closed set of failures an operator can see for one lead search.
///
/// Every variant carries a fixed message; raw transport text never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// No date was supplied.
    MissingDate,
    /// No account identifier was supplied.
    MissingAccountId,
    /// The date could not be normalized.
    InvalidInput,
    /// The remote API throttled the request (HTTP 429).
    RateLimited,
    /// The remote resource was not found (HTTP 404), usually a wrong datasheet id or field name.
    NotFoundOrMisconfigured,
    /// Any other remote or transport failure.
    Unknown,
    /// Another search is still in flight.
    Busy,
}

impl SearchError {
    /// Stable machine-readable category name.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::MissingDate => "missing_date",
            SearchError::MissingAccountId => "missing_account_id",
            SearchError::InvalidInput => "invalid_input",
            SearchError::RateLimited => "rate_limited",
            SearchError::NotFoundOrMisconfigured => "not_found_or_misconfigured",
            SearchError::Unknown => "unknown",
            SearchError::Busy => "busy",
        }
    }

    /// Fixed operator-facing message.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::MissingDate => "Please select a date before searching.",
            SearchError::MissingAccountId => "Please enter an Account ID before searching.",
            SearchError::InvalidInput => {
                "The selected date could not be understood. Please pick a valid date."
            }
            SearchError::RateLimited => {
                "Rate limit exceeded. Please wait a moment and try again."
            }
            SearchError::NotFoundOrMisconfigured => {
                "Invalid request. Check your table ID or field name."
            }
            SearchError::Unknown => "Something went wrong. Please check your setup and try again.",
            SearchError::Busy => "A search is already in progress. Please wait for it to finish.",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::MissingDate
            | SearchError::MissingAccountId
            | SearchError::InvalidInput => StatusCode::BAD_REQUEST,
            SearchError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SearchError::NotFoundOrMisconfigured | SearchError::Unknown => StatusCode::BAD_GATEWAY,
            SearchError::Busy => StatusCode::CONFLICT,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for SearchError {}

impl From<&AppError> for SearchError {
    /// Folds an internal failure into its operator-facing category.
    fn from(err: &AppError) -> Self {
        match err {
            AppError::RemoteStatus { status: 429, .. } => SearchError::RateLimited,
            AppError::RemoteStatus { status: 404, .. } => SearchError::NotFoundOrMisconfigured,
            _ => SearchError::Unknown,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        match self {
            SearchError::RateLimited | SearchError::Busy => {
                tracing::warn!("Search rejected: {}", self.code());
            }
            SearchError::NotFoundOrMisconfigured | SearchError::Unknown => {
                tracing::error!("Search failed: {}", self.code());
            }
            _ => tracing::debug!("Search input rejected: {}", self.code()),
        }

        let body = Json(json!({
            "error": self.code(),
            "message": self.user_message(),
        }));

        (self.status_code(), body).into_response()
    }
}
