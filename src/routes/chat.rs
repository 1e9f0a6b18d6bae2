use actix_web::{web, HttpResponse, Responder};
use serde_json::{Map, Value};
use validator::Validate;
use crate::models::{ChatRequest, ChatResponse, PreferencesResponse};
use crate::routes::{error_body, AppState};
use crate::services::ChatError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/chat", web::post().to(chat))
        .route("/sessions/{session_id}/preferences", web::get().to(get_preferences))
        .route("/sessions/{session_id}/preferences", web::put().to(merge_preferences));
}

/// Chat relay endpoint
///
/// POST /api/v1/chat
///
/// Request body:
/// ```json
/// {
///   "question": "string",
///   "sessionId": "string",
///   "preferences": { "city": "Lyon" }
/// }
/// ```
async fn chat(state: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body("Validation failed", errors.to_string(), 400));
    }

    let ChatRequest { question, session_id, preferences } = req.into_inner();
    let session_id = session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let preferences = state.sessions.merge(&session_id, preferences).await;

    match state.chat.ask(&question, &session_id, &preferences).await {
        Ok(answer) => HttpResponse::Ok().json(ChatResponse {
            answer,
            session_id,
            preferences,
        }),
        Err(e) => {
            tracing::error!("Chat relay failed for session {}: {}", session_id, e);
            let message = e.to_string();
            match e {
                ChatError::InvalidResponse(_) => {
                    HttpResponse::BadGateway().json(error_body("invalid_chat_reply", message, 502))
                }
                _ => HttpResponse::BadGateway().json(error_body("chat_unavailable", message, 502)),
            }
        }
    }
}

/// GET /api/v1/sessions/{session_id}/preferences
async fn get_preferences(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    let preferences = state.sessions.get(&session_id).await;

    HttpResponse::Ok().json(PreferencesResponse { session_id, preferences })
}

/// PUT /api/v1/sessions/{session_id}/preferences
async fn merge_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> impl Responder {
    let session_id = path.into_inner();
    let incoming: Map<String, Value> = match body.into_inner() {
        Value::Object(map) => map,
        _ => {
            return HttpResponse::BadRequest().json(error_body(
                "invalid_preferences",
                "Preferences must be a JSON object",
                400,
            ));
        }
    };

    let preferences = state.sessions.merge(&session_id, incoming).await;

    HttpResponse::Ok().json(PreferencesResponse { session_id, preferences })
}
