use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process store of chat session preferences
///
/// Lives for the lifetime of the server; nothing is persisted.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    sessions: RwLock<HashMap<String, Map<String, Value>>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences recorded for a session, empty when unknown
    pub async fn get(&self, session_id: &str) -> Map<String, Value> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Shallow merge; incoming keys overwrite stored ones
    pub async fn merge(&self, session_id: &str, incoming: Map<String, Value>) -> Map<String, Value> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.entry(session_id.to_string()).or_default();

        for (key, value) in incoming {
            stored.insert(key, value);
        }

        tracing::trace!("Session {} now has {} preferences", session_id, stored.len());
        stored.clone()
    }
}
