use serde::Deserialize;
use url::Url;

pub const DEFAULT_AITABLE_BASE_URL: &str = "https://aitable.ai/fusion/v1";
pub const DEFAULT_DATE_FIELD: &str = "date";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base URL of the AITable fusion API, without trailing slash.
    pub aitable_base_url: String,
    /// Datasheet holding the lead records.
    pub aitable_datasheet_id: String,
    /// Bearer token passed through on every request.
    pub aitable_token: String,
    /// Name of the date field used in the remote equality filter.
    pub date_field: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            aitable_base_url: validate_base_url(
                std::env::var("AITABLE_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_AITABLE_BASE_URL.to_string()),
            )?,
            aitable_datasheet_id: std::env::var("AI_TABLE_ID")
                .or_else(|_| std::env::var("VITE_AI_TABLE_ID"))
                .map_err(|_| {
                    anyhow::anyhow!("AI_TABLE_ID or VITE_AI_TABLE_ID environment variable required")
                })
                .and_then(|id| {
                    if id.trim().is_empty() {
                        anyhow::bail!("AI_TABLE_ID cannot be empty");
                    }
                    Ok(id.trim().to_string())
                })?,
            aitable_token: std::env::var("AI_API_TOKEN")
                .or_else(|_| std::env::var("VITE_AI_API_TOKEN"))
                .map_err(|_| {
                    anyhow::anyhow!(
                        "AI_API_TOKEN or VITE_AI_API_TOKEN environment variable required"
                    )
                })
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("AI_API_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            date_field: std::env::var("AITABLE_DATE_FIELD")
                .unwrap_or_else(|_| DEFAULT_DATE_FIELD.to_string())
                .trim()
                .to_string(),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a positive integer")
                })?,
        };

        if config.date_field.is_empty() {
            anyhow::bail!("AITABLE_DATE_FIELD cannot be empty");
        }

        // Log successful configuration load (never the token)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("AITable Base URL: {}", config.aitable_base_url);
        tracing::debug!("AITable datasheet: {}", config.aitable_datasheet_id);
        tracing::debug!("Date filter field: {}", config.date_field);
        tracing::debug!("Request timeout: {}s", config.request_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Checks that a base URL is an absolute http(s) URL and strips any trailing slash.
pub fn validate_base_url(url: String) -> anyhow::Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("AITABLE_BASE_URL cannot be empty");
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!("AITABLE_BASE_URL must start with http:// or https://");
    }
    Url::parse(trimmed).map_err(|e| anyhow::anyhow!("AITABLE_BASE_URL is not a valid URL: {}", e))?;
    Ok(trimmed.to_string())
}
