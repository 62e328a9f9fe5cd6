use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use std::sync::Arc;
use tower::ServiceExt;

use rago_catalog::cache::{DraftStore, KeyValueStore, MemoryStore, DRAFT_STORAGE_KEY};
use rago_catalog::config::environment::EnvironmentConfig;
use rago_catalog::create_router;
use rago_catalog::models::form_state::{FormField, MoveDirection};
use rago_catalog::models::vehicle::{Transmission, Vehicle, VehicleFormData};
use rago_catalog::repositories::VehicleRepository;
use rago_catalog::services::preview::{project_preview, PLACEHOLDER_MAKE};
use rago_catalog::services::vehicle_form::{FormMode, VehicleForm};
use rago_catalog::state::AppState;
use rago_catalog::utils::errors::{AppError, AppResult, FormError};
use rago_catalog::utils::image::PLACEHOLDER_IMAGE_URL;

fn drafts() -> (Arc<MemoryStore>, DraftStore) {
    let store = Arc::new(MemoryStore::new());
    (store.clone(), DraftStore::new(store))
}

fn listed_vehicle() -> Vehicle {
    Vehicle {
        id: 7,
        make: "Chevrolet".into(),
        model: "Onix".into(),
        year: 2021,
        price: 14_000_000,
        mileage: 30_000,
        engine: "1.2".into(),
        transmission: Transmission::Automatic,
        fuel_type: "Bioetanol".into(),
        description: "Service oficial".into(),
        images: vec!["https://cdn.test/onix.jpg".into()],
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_full_create_session() {
    let (store, drafts) = drafts();
    let mut form = VehicleForm::open(FormMode::Create, drafts.clone()).await;

    form.set_field(FormField::Make, "Renault").await.unwrap();
    form.set_field(FormField::Model, "Kwid").await.unwrap();
    form.set_field(FormField::Price, "$ 9.999.999").await.unwrap();
    form.update_image(0, "https://cdn.test/kwid-1.jpg").await.unwrap();
    form.add_image().await;
    form.update_image(1, "https://cdn.test/kwid-2.jpg").await.unwrap();
    assert!(form.move_image(1, MoveDirection::Up).await);

    // Cerrar sin enviar deja el borrador para la próxima apertura
    form.close();
    let mut form = VehicleForm::open(FormMode::Create, drafts).await;
    assert_eq!(form.state().price, "9999999");
    assert_eq!(form.state().images[0], "https://cdn.test/kwid-2.jpg");

    let mut submitted = None;
    form.submit(|payload| submitted = Some(payload)).await.unwrap();

    let payload = submitted.unwrap();
    assert_eq!(payload.id, None);
    assert_eq!(payload.price, 9_999_999);
    assert_eq!(payload.images.len(), 2);
    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_edit_session_never_touches_drafts() {
    let (store, drafts) = drafts();
    let mut create = VehicleForm::open(FormMode::Create, drafts.clone()).await;
    create.set_field(FormField::Make, "Borrador").await.unwrap();

    let mut edit = VehicleForm::open(FormMode::Edit(listed_vehicle()), drafts).await;
    assert!(store.is_empty());
    assert_eq!(edit.state().custom_fuel_type, "Bioetanol");
    assert!(edit.requires_custom_fuel());

    edit.set_field(FormField::Mileage, "31.500").await.unwrap();
    assert!(store.is_empty());

    let mut submitted = None;
    edit.submit(|payload| submitted = Some(payload)).await.unwrap();
    let payload = submitted.unwrap();
    assert_eq!(payload.id, Some(7));
    assert_eq!(payload.mileage, 31_500);
    assert_eq!(payload.fuel_type, "Bioetanol");
}

#[tokio::test]
async fn test_custom_fuel_must_be_filled() {
    let (_, drafts) = drafts();
    let mut form = VehicleForm::open(FormMode::Create, drafts).await;
    form.update_image(0, "https://cdn.test/a.jpg").await.unwrap();
    form.set_field(FormField::FuelType, "Otro").await.unwrap();
    form.set_field(FormField::CustomFuelType, "   ").await.unwrap();

    let mut called = false;
    let result = form.submit(|_| called = true).await;
    assert_eq!(result, Err(FormError::MissingCustomFuelType));
    assert!(!called);
    assert_eq!(form.state().custom_fuel_type, "   ");
}

#[tokio::test]
async fn test_preview_of_blank_form_is_total() {
    let (_, drafts) = drafts();
    let form = VehicleForm::open(FormMode::Create, drafts).await;
    let preview = form.preview();

    assert_eq!(preview.make, PLACEHOLDER_MAKE);
    assert_eq!(preview.images, vec![PLACEHOLDER_IMAGE_URL.to_string()]);
    assert_eq!(preview.price, 0);

    let again = project_preview(form.state(), None);
    assert_eq!(again.make, preview.make);
}

#[tokio::test]
async fn test_corrupt_draft_opens_fresh_form() {
    let (store, drafts) = drafts();
    store.set(DRAFT_STORAGE_KEY, "{not json").await.unwrap();

    let form = VehicleForm::open(FormMode::Create, drafts).await;
    assert_eq!(form.state().make, "");
    assert_eq!(form.state().images, vec![String::new()]);
}

struct UnavailableRepository;

#[async_trait]
impl VehicleRepository for UnavailableRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i64) -> AppResult<Option<Vehicle>> {
        Ok(None)
    }

    async fn create(&self, _data: VehicleFormData) -> AppResult<Vehicle> {
        Err(AppError::ExternalApi("connection refused".into()))
    }

    async fn update(&self, _id: i64, _data: VehicleFormData) -> AppResult<Vehicle> {
        Err(AppError::ExternalApi("connection refused".into()))
    }

    async fn delete(&self, _id: i64) -> AppResult<()> {
        Err(AppError::ExternalApi("connection refused".into()))
    }
}

#[tokio::test]
async fn test_failed_save_keeps_draft() {
    let (store, drafts) = drafts();
    let state = AppState::new(EnvironmentConfig::default(), Arc::new(UnavailableRepository), drafts.clone());
    let app = create_router(state);

    let mut form = VehicleForm::open(FormMode::Create, drafts).await;
    form.set_field(FormField::Make, "Nissan").await.unwrap();
    form.update_image(0, "https://cdn.test/frontier.jpg").await.unwrap();

    let body = serde_json::json!({ "state": form.state() });
    let request = Request::builder()
        .method("POST")
        .uri("/api/form/submit")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["message"], "No se pudo guardar el vehículo. Intenta de nuevo.");

    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_some());
}
