use crate::config::Config;
use crate::errors::AppError;
use crate::models::{LeadRecord, RecordsEnvelope};
use std::time::Duration;

/// Client for the AITable fusion datasheet API.
#[derive(Clone)]
pub struct AitableClient {
    client: reqwest::Client,
    base_url: String,
    datasheet_id: String,
    token: String,
    date_field: String,
}

impl AitableClient {
    /// Creates a new `AitableClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the fusion API, e.g. `https://aitable.ai/fusion/v1`.
    /// * `datasheet_id` - Datasheet holding the lead records.
    /// * `token` - Bearer token for authentication.
    /// * `date_field` - Name of the field filtered on.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        base_url: String,
        datasheet_id: String,
        token: String,
        date_field: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create AITable client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            datasheet_id,
            token,
            date_field,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.aitable_base_url.clone(),
            config.aitable_datasheet_id.clone(),
            config.aitable_token.clone(),
            config.date_field.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Fetches every record whose date field equals `date`.
    ///
    /// Issues exactly one request; no retries. A response without
    /// `data.records` yields an empty list.
    ///
    /// # Arguments
    ///
    /// * `date` - Canonical `YYYY-MM-DD` key.
    ///
    /// # Returns
    ///
    /// * `Result<Vec<LeadRecord>, AppError>` - Records in source order, or
    ///   `AppError::RemoteStatus` for non-success statuses and
    ///   `AppError::ExternalApiError` for transport or decoding failures.
    pub async fn fetch_records_by_date(&self, date: &str) -> Result<Vec<LeadRecord>, AppError> {
        let filter = format!("{}={}", self.date_field, date);
        // Build URL with proper parameter encoding
        let url = reqwest::Url::parse_with_params(
            &format!(
                "{}/datasheets/{}/records",
                self.base_url, self.datasheet_id
            ),
            &[("filter", filter.as_str())],
        )
        .map_err(|e| AppError::ExternalApiError(format!("Failed to build URL: {}", e)))?;

        tracing::info!(
            "Fetching records from datasheet {} with filter {}",
            self.datasheet_id,
            filter
        );

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RemoteStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let envelope: RecordsEnvelope = response.json().await?;

        let records = envelope.into_records();
        tracing::info!("✓ Fetched {} records for {}", records.len(), date);
        Ok(records)
    }
}
