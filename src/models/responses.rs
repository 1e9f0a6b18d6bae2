use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::models::domain::ListingRecord;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Chat relay response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub preferences: Map<String, Value>,
}

/// Session preferences response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub preferences: Map<String, Value>,
}

/// Listings query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub listings: Vec<ListingRecord>,
    pub count: usize,
}
