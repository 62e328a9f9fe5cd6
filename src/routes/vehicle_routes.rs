use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{ApiResponse, CatalogQuery, CatalogResponse, VehicleDetailQuery};
use crate::models::vehicle::{Vehicle, VehicleFormData};
use crate::services::vehicle_views::VehicleDetailView;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/brands", get(list_brands))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.vehicles.clone(), &state.config.contact_phone)
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>, AppError> {
    let response = controller(&state).list(query).await?;
    Ok(Json(response))
}

async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let response = controller(&state).brands().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<VehicleDetailQuery>,
) -> Result<Json<VehicleDetailView>, AppError> {
    let response = controller(&state).detail(id, query.image).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<VehicleFormData>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<VehicleFormData>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}
