use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Question for the chat relay
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub question: String,
    #[serde(alias = "session_id", rename = "sessionId", default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
}

/// Filters accepted by the listings endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilters {
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub min_area: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_area: Option<f64>,
    #[validate(range(min = 0, max = 100))]
    pub rooms: Option<i32>,
    #[validate(range(min = 1))]
    pub limit: Option<i64>,
}
