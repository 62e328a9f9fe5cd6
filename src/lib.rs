//! Catálogo de vehículos de la concesionaria
//!
//! API HTTP del catálogo: listado filtrable, detalle con carrusel, formulario
//! de alta/edición con borrador persistente y vista previa en vivo.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_for;
use state::AppState;

/// Router completo de la API
pub fn create_router(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/form", routes::form_routes::create_form_router())
        .nest("/api/images", routes::image_routes::create_image_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
