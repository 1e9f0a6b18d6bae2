use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use crate::routes::{error_body, upstream_status, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommend", web::post().to(recommend));
}

/// Recommendation pass-through
///
/// POST /api/v1/recommend
async fn recommend(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    match state.recommender.recommend(&body).await {
        Ok(reply) => HttpResponse::build(upstream_status(reply.status)).json(reply.body),
        Err(e) => {
            tracing::error!("Recommendation request failed: {}", e);
            HttpResponse::BadGateway().json(error_body("recommendation_unavailable", e.to_string(), 502))
        }
    }
}
