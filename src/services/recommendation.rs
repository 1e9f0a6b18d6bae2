use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the recommendation endpoint
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// Upstream reply relayed unchanged to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedResponse {
    pub status: u16,
    pub body: Value,
}

/// Pass-through client for the recommendation model
pub struct RecommendationClient {
    base_url: String,
    client: Client,
}

impl RecommendationClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, RecommendationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// POST the body to `<base>/recommend` and hand back whatever came back
    pub async fn recommend(&self, body: &Value) -> Result<RelayedResponse, RecommendationError> {
        let url = format!("{}/recommend", self.base_url.trim_end_matches('/'));

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        tracing::debug!("POST {} -> {}", url, status);

        Ok(RelayedResponse { status, body })
    }
}
