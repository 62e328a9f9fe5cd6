use axum::{extract::Query, routing::get, Json, Router};

use crate::dto::vehicle_dto::{OptimizeQuery, OptimizedImageResponse};
use crate::state::AppState;
use crate::utils::image::optimize_url;

pub fn create_image_router() -> Router<AppState> {
    Router::new().route("/optimize", get(optimize))
}

// Nunca falla: las entradas inválidas devuelven el placeholder
async fn optimize(Query(query): Query<OptimizeQuery>) -> Json<OptimizedImageResponse> {
    Json(OptimizedImageResponse {
        url: optimize_url(&query.url, &query.options()),
    })
}
