// Route exports
pub mod chat;
pub mod health;
pub mod listings;
pub mod predict;
pub mod recommend;

use crate::config::AssetSettings;
use crate::models::ErrorResponse;
use crate::services::{ChatRelay, ListingsWarehouse, PredictionDispatcher, PreferenceStore, RecommendationClient};
use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PredictionDispatcher>,
    pub recommender: Arc<RecommendationClient>,
    pub chat: Arc<ChatRelay>,
    pub sessions: Arc<PreferenceStore>,
    pub warehouse: Arc<ListingsWarehouse>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(predict::configure)
            .configure(recommend::configure)
            .configure(chat::configure)
            .configure(listings::configure),
    );
}

/// Static site assets, mounted last so the API scope takes precedence
pub fn configure_assets(cfg: &mut web::ServiceConfig, assets: &AssetSettings) {
    cfg.service(actix_files::Files::new("/", &assets.dir).index_file(assets.index_file.clone()));
}

/// JSON error body used for malformed payloads and query strings
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(error_body("invalid_json", format!("Invalid JSON: {}", err), 400)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError(error_body("invalid_query", format!("Invalid query: {}", err), 400)).into()
}

pub(crate) fn error_body(error: &str, message: impl Into<String>, status_code: u16) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    }
}

/// Mirror an upstream status, falling back to 502 for codes actix rejects
pub(crate) fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}
