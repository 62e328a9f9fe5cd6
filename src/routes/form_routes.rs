use axum::{
    extract::State,
    routing::{post, put},
    Json, Router,
};

use crate::controllers::form_controller::FormController;
use crate::dto::form_dto::{
    FormActionRequest, FormSnapshot, FormStateRequest, OpenFormRequest, PreviewRequest, PreviewResponse,
};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_form_router() -> Router<AppState> {
    Router::new()
        .route("/open", post(open_form))
        .route("/draft", put(save_draft))
        .route("/action", post(apply_action))
        .route("/preview", post(preview))
        .route("/submit", post(submit))
}

fn controller(state: &AppState) -> FormController {
    FormController::new(state.vehicles.clone(), state.drafts.clone(), &state.config.contact_phone)
}

async fn open_form(
    State(state): State<AppState>,
    Json(request): Json<OpenFormRequest>,
) -> Result<Json<FormSnapshot>, AppError> {
    let response = controller(&state).open(request.vehicle_id).await?;
    Ok(Json(response))
}

async fn save_draft(
    State(state): State<AppState>,
    Json(request): Json<FormStateRequest>,
) -> Result<Json<FormSnapshot>, AppError> {
    let response = controller(&state).save_draft(request.state).await?;
    Ok(Json(response))
}

async fn apply_action(
    State(state): State<AppState>,
    Json(request): Json<FormActionRequest>,
) -> Result<Json<FormSnapshot>, AppError> {
    let response = controller(&state).apply(request.state, request.action).await?;
    Ok(Json(response))
}

async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let response = controller(&state).preview(request.state, request.mode).await?;
    Ok(Json(response))
}

async fn submit(
    State(state): State<AppState>,
    Json(request): Json<FormStateRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = controller(&state).submit(request.state).await?;
    Ok(Json(response))
}
