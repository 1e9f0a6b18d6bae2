use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use crate::routes::{error_body, upstream_status, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict", web::post().to(predict));
}

/// Price prediction proxy
///
/// POST /api/v1/predict
///
/// Request body: flat object of model features, e.g.
/// ```json
/// { "procedure_area": 85, "rooms": 3, "city": "Lyon" }
/// ```
///
/// The response status mirrors the upstream attempt that produced it.
async fn predict(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    let Value::Object(features) = body.into_inner() else {
        return HttpResponse::BadRequest().json(error_body(
            "invalid_features",
            "Prediction features must be a JSON object",
            400,
        ));
    };

    tracing::info!("Proxying prediction with {} features", features.len());

    match state.predictor.dispatch(&features).await {
        Ok(result) => HttpResponse::build(upstream_status(result.status)).json(&result),
        Err(e) => {
            tracing::error!("Prediction dispatch failed: {}", e);
            HttpResponse::BadGateway().json(error_body("prediction_unavailable", e.to_string(), 502))
        }
    }
}
