use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ListingFilters, ListingsResponse};
use crate::routes::{error_body, AppState};
use crate::services::WarehouseError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/listings", web::get().to(list_listings));
}

/// Listings search
///
/// GET /api/v1/listings?city=Lyon&minPrice=100000&maxPrice=400000&rooms=3&limit=20
async fn list_listings(
    state: web::Data<AppState>,
    query: web::Query<ListingFilters>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_body("Validation failed", errors.to_string(), 400));
    }

    match state.warehouse.query(&query).await {
        Ok(listings) => HttpResponse::Ok().json(ListingsResponse {
            count: listings.len(),
            listings,
        }),
        Err(WarehouseError::InvalidInput(message)) => {
            HttpResponse::BadRequest().json(error_body("Invalid filters", message, 400))
        }
        Err(e) => {
            tracing::error!("Listings query failed: {}", e);
            HttpResponse::InternalServerError().json(error_body("Failed to query listings", e.to_string(), 500))
        }
    }
}
