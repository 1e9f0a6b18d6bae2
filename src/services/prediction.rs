use crate::core::{extract, resolve, Attempt, ATTEMPTS, LAST_RESORT};
use crate::models::ProxyResult;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a prediction dispatch
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction upstream unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What came back from one attempt
#[derive(Debug)]
struct UpstreamReply {
    status: u16,
    body: Value,
    raw_number: Option<f64>,
}

/// Prediction proxy for a model endpoint whose request and response shapes
/// are not known in advance.
///
/// Tries each (path, body shape) of [`ATTEMPTS`] in order and stops at the
/// first response that contains a number. Attempts are strictly sequential.
pub struct PredictionDispatcher {
    base_url: String,
    client: Client,
}

impl PredictionDispatcher {
    /// Create a dispatcher; `timeout` bounds every single attempt
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, PredictionError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Proxy one prediction request
    ///
    /// Any transport failure (connection refused, timeout, broken body)
    /// fails the whole dispatch. Responses without a number only move on
    /// to the next attempt.
    pub async fn dispatch(&self, features: &Map<String, Value>) -> Result<ProxyResult, PredictionError> {
        let body = Value::Object(features.clone());

        for (index, attempt) in ATTEMPTS.iter().enumerate() {
            let reply = self.call(attempt, &body).await?;

            if let Some(raw) = reply.raw_number {
                tracing::debug!("Attempt {} ({} {:?}) produced {}", index + 1, attempt.path, attempt.shape, raw);
                return Ok(finalize(reply, raw, features));
            }
        }

        tracing::warn!(
            "No numeric prediction from {} after {} attempts, trying {} once more",
            self.base_url,
            ATTEMPTS.len(),
            LAST_RESORT.path
        );

        let reply = self.call(&LAST_RESORT, &body).await?;
        match reply.raw_number {
            Some(raw) => Ok(finalize(reply, raw, features)),
            None => {
                tracing::warn!("Prediction upstream gave no usable number (status {})", reply.status);
                Ok(ProxyResult::unresolved(reply.status, reply.body))
            }
        }
    }

    async fn call(&self, attempt: &Attempt, features: &Value) -> Result<UpstreamReply, PredictionError> {
        let url = attempt.url(&self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&attempt.shape.wrap(features))
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        let (body, raw_number) = match serde_json::from_str::<Value>(&text) {
            Ok(json) => {
                let raw_number = extract(&json);
                (json, raw_number)
            }
            Err(_) if text.trim().is_empty() => (Value::Null, None),
            Err(_) => (Value::String(text), None),
        };

        tracing::debug!("POST {} ({:?}) -> {} number={:?}", url, attempt.shape, status, raw_number);

        Ok(UpstreamReply { status, body, raw_number })
    }
}

fn finalize(reply: UpstreamReply, raw: f64, features: &Map<String, Value>) -> ProxyResult {
    let chosen = resolve(raw, features);

    tracing::info!(
        "Predicted price {} from raw {} via {}",
        chosen.value,
        raw,
        chosen.rule
    );

    ProxyResult::resolved(reply.status, reply.body, raw, chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_creation() {
        let dispatcher = PredictionDispatcher::new(
            "http://model.test:8000".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(dispatcher.base_url(), "http://model.test:8000");
    }
}
