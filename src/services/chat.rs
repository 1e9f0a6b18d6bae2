use reqwest::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Fields that may carry the answer in a webhook reply
const ANSWER_FIELDS: [&str; 4] = ["answer", "output", "text", "message"];

/// Errors that can occur when relaying a question to the chat webhook
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Chat webhook returned status {0}")]
    Upstream(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Relay between the site chat widget and the conversational webhook
pub struct ChatRelay {
    webhook_url: String,
    client: Client,
}

impl ChatRelay {
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { webhook_url, client })
    }

    /// Ask the webhook a question on behalf of a session
    pub async fn ask(
        &self,
        question: &str,
        session_id: &str,
        preferences: &Map<String, Value>,
    ) -> Result<String, ChatError> {
        let payload = json!({
            "question": question,
            "sessionId": session_id,
            "preferences": preferences,
        });

        let response = self.client.post(&self.webhook_url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!("Chat webhook failed for session {}: {}", session_id, status);
            return Err(ChatError::Upstream(status));
        }

        let text = response.text().await?;

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => answer_text(&json)
                .ok_or_else(|| ChatError::InvalidResponse("No answer field in webhook reply".into())),
            Err(_) if text.trim().is_empty() => {
                Err(ChatError::InvalidResponse("Empty webhook reply".into()))
            }
            Err(_) => Ok(text),
        }
    }
}

/// Pull the answer out of a webhook reply
///
/// Accepts a bare string, an object with one of the answer fields, or an
/// array whose first element is either of those.
pub fn answer_text(body: &Value) -> Option<String> {
    match body {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ANSWER_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(str::to_string),
        Value::Array(items) => items.first().and_then(answer_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_text_shapes() {
        assert_eq!(answer_text(&json!({ "answer": "Yes" })), Some("Yes".to_string()));
        assert_eq!(answer_text(&json!([{ "output": "Two rooms" }])), Some("Two rooms".to_string()));
        assert_eq!(answer_text(&json!("plain")), Some("plain".to_string()));
        assert_eq!(answer_text(&json!({ "status": "ok" })), None);
        assert_eq!(answer_text(&json!(42)), None);
    }
}
