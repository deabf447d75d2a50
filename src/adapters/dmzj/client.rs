//! DMZJ subscription API client
//!
//! Issues one HTTP GET per page against the UCenter subscribe endpoint and
//! classifies the response. No retry logic lives here; a call is exactly
//! one network attempt.

use super::models::{FetchRequest, PageOutcome, SubscriptionSource};
use crate::config::DmzjConfig;
use crate::domain::{FetchError, RawRecord, Result, SubvaultError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// HTTP client for the DMZJ subscription endpoint
///
/// The inner `reqwest::Client` holds a shared connection pool and is safe
/// to use from any number of concurrent page workers.
pub struct DmzjClient {
    /// Subscription endpoint URL
    base_url: String,

    /// HTTP client for making requests
    client: Client,
}

impl DmzjClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &DmzjConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                SubvaultError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Get the subscription endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify a response body.
    ///
    /// The endpoint signals end-of-data with an empty array (or nothing at
    /// all). A body that is not a JSON array is treated as transient: the
    /// endpoint intermittently serves HTML error pages that clear up on
    /// retry, and persistent garbage still fails once retries are spent.
    fn classify_body(page: u32, body: &str) -> std::result::Result<PageOutcome, FetchError> {
        if body.trim().is_empty() {
            return Ok(PageOutcome::EndOfData);
        }

        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| FetchError::Transient {
                page,
                message: format!("malformed response body: {e}"),
            })?;

        match value {
            serde_json::Value::Null => Ok(PageOutcome::EndOfData),
            serde_json::Value::Array(items) if items.is_empty() => Ok(PageOutcome::EndOfData),
            serde_json::Value::Array(items) => Ok(PageOutcome::Records(
                items.into_iter().map(RawRecord::new).collect(),
            )),
            other => Err(FetchError::Transient {
                page,
                message: format!("expected JSON array, got {}", json_kind(&other)),
            }),
        }
    }
}

#[async_trait]
impl SubscriptionSource for DmzjClient {
    async fn fetch_page(
        &self,
        request: &FetchRequest,
    ) -> std::result::Result<PageOutcome, FetchError> {
        let page = request.page;

        tracing::debug!(
            page = page,
            category = request.category,
            letter = %request.letter,
            "Fetching subscription page"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("type", request.category.to_string()),
                ("letter", request.letter.clone()),
                ("sub_type", request.subscription_status.to_string()),
                ("page", page.to_string()),
                ("uid", request.user_id.clone()),
                ("dmzj_token", request.token.expose_secret().to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transient {
                page,
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transient {
                page,
                message: format!("HTTP status {status}"),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transient {
            page,
            message: format!("failed to read response body: {e}"),
        })?;

        Self::classify_body(page, &body)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
