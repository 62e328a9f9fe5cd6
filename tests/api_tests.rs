use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use rago_catalog::cache::{DraftStore, KeyValueStore, MemoryStore, DRAFT_STORAGE_KEY};
use rago_catalog::config::environment::EnvironmentConfig;
use rago_catalog::create_router;
use rago_catalog::models::vehicle::{Transmission, Vehicle};
use rago_catalog::repositories::InMemoryVehicleRepository;
use rago_catalog::state::AppState;
use rago_catalog::utils::validation::current_year;

fn vehicle(id: i64, make: &str, model: &str, year: i32, price: i64, images: usize) -> Vehicle {
    Vehicle {
        id,
        make: make.into(),
        model: model.into(),
        year,
        price,
        mileage: 50_000,
        engine: "2.0".into(),
        transmission: Transmission::Manual,
        fuel_type: "Nafta".into(),
        description: format!("{} {} impecable", make, model),
        images: (0..images).map(|i| format!("https://cdn.test/{id}/{i}.jpg")).collect(),
        created_at: Utc::now() - Duration::days(id),
    }
}

fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let repository = InMemoryVehicleRepository::with_vehicles(vec![
        vehicle(1, "Toyota", "Corolla", 2017, 12_000_000, 1),
        vehicle(2, "Toyota", "Hilux", 2019, 25_000_000, 3),
        vehicle(3, "Ford", "Ranger", 2020, 30_000_000, 2),
    ]);
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        EnvironmentConfig::default(),
        Arc::new(repository),
        DraftStore::new(store.clone()),
    );
    (create_router(state), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn complete_state() -> Value {
    json!({
        "make": "Peugeot",
        "model": "208",
        "year": "2022",
        "price": "18.500.000",
        "mileage": "12000",
        "engine": "1.6",
        "transmission": "Manual",
        "fuelType": "Nafta",
        "description": "Como nuevo",
        "images": ["https://cdn.test/208.jpg", ""]
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_catalog_filters_combine() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, "GET", "/api/vehicles?make=toy&year=2018", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["model"], "Hilux");
    assert_eq!(body["cards"][0]["price"], "$25.000.000");
}

#[tokio::test]
async fn test_catalog_sanitizes_numeric_filters() {
    let (app, _) = create_test_app();
    let (_, body) = send(&app, "GET", "/api/vehicles?price=25.000.000", None).await;

    assert_eq!(body["filters"]["price"], "25000000");
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_catalog_search() {
    let (app, _) = create_test_app();
    let (_, body) = send(&app, "GET", "/api/vehicles?search=ford%20ranger", None).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["id"], 3);

    let (_, body) = send(&app, "GET", "/api/vehicles", None).await;
    assert_eq!(body["total"], 3);
    assert!(body["contact_link"].as_str().unwrap().starts_with("https://wa.me/"));
}

#[tokio::test]
async fn test_brands() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, "GET", "/api/vehicles/brands", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Ford", "Toyota"]));
}

#[tokio::test]
async fn test_vehicle_detail_with_carousel_index() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, "GET", "/api/vehicles/2?image=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Toyota Hilux");
    assert_eq!(body["carousel"]["kind"], "image");
    assert_eq!(body["carousel"]["index"], 2);
    assert_eq!(body["carousel"]["alt"], "Vehicle image 3");
    assert_eq!(body["carousel"]["indicators"], json!([false, false, true]));
}

#[tokio::test]
async fn test_vehicle_not_found() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, "GET", "/api/vehicles/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_direct_create_requires_images() {
    let (app, _) = create_test_app();
    let payload = json!({
        "make": "Fiat", "model": "Cronos", "year": 2023, "price": 1, "mileage": 0,
        "engine": "1.3", "transmission": "Manual", "fuelType": "Nafta",
        "description": "", "images": []
    });
    let (status, body) = send(&app, "POST", "/api/vehicles", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_vehicle() {
    let (app, _) = create_test_app();
    let (status, _) = send(&app, "DELETE", "/api/vehicles/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/api/vehicles/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_open_create_form_without_draft() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, "POST", "/api/form/open", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Añadir Vehículo");
    assert_eq!(body["editing"], false);
    assert_eq!(body["state"]["year"], current_year().to_string());
    assert_eq!(body["image_slots"][0]["primary"], true);
    assert_eq!(body["image_slots"][0]["preview"]["status"], "empty");
    assert_eq!(body["preview"]["make"], "Marca");
}

#[tokio::test]
async fn test_draft_survives_reopen() {
    let (app, store) = create_test_app();
    let (status, _) = send(&app, "PUT", "/api/form/draft", Some(json!({ "state": complete_state() }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_some());

    let (_, body) = send(&app, "POST", "/api/form/open", Some(json!({}))).await;
    assert_eq!(body["state"]["make"], "Peugeot");
    assert_eq!(body["state"]["price"], "18500000");
}

#[tokio::test]
async fn test_open_edit_form_discards_draft() {
    let (app, store) = create_test_app();
    send(&app, "PUT", "/api/form/draft", Some(json!({ "state": complete_state() }))).await;

    let (status, body) = send(&app, "POST", "/api/form/open", Some(json!({ "vehicle_id": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Editar Vehículo");
    assert_eq!(body["state"]["id"], 2);
    assert_eq!(body["state"]["price"], "25000000");
    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_none());

    let (_, body) = send(&app, "POST", "/api/form/open", Some(json!({}))).await;
    assert_eq!(body["state"]["make"], "");
}

#[tokio::test]
async fn test_form_action_updates_state() {
    let (app, store) = create_test_app();
    let request = json!({
        "state": complete_state(),
        "action": { "type": "set_field", "field": "fuelType", "value": "Otro" }
    });
    let (status, body) = send(&app, "POST", "/api/form/action", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requires_custom_fuel"], true);
    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_some());

    let request = json!({
        "state": complete_state(),
        "action": { "type": "set_field", "field": "transmission", "value": "CVT" }
    });
    let (status, body) = send(&app, "POST", "/api/form/action", Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_OPTION");
}

#[tokio::test]
async fn test_preview_detail_mode() {
    let (app, _) = create_test_app();
    let request = json!({ "state": { "model": "Hilux", "year": "0" }, "mode": "detail" });
    let (status, body) = send(&app, "POST", "/api/form/preview", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "detail");
    assert_eq!(body["entity"]["make"], "Marca");
    assert_eq!(body["entity"]["year"], current_year());
    assert_eq!(body["panel"]["mode"], "detail");
    assert_eq!(body["panel"]["view"]["title"], "Marca Hilux");
}

#[tokio::test]
async fn test_submit_without_images_keeps_draft() {
    let (app, store) = create_test_app();
    let mut state = complete_state();
    state["images"] = json!(["", "  "]);
    send(&app, "PUT", "/api/form/draft", Some(json!({ "state": state.clone() }))).await;

    let (status, body) = send(&app, "POST", "/api/form/submit", Some(json!({ "state": state }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Por favor, añade al menos una URL de imagen.");
    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn test_submit_create_clears_draft() {
    let (app, store) = create_test_app();
    send(&app, "PUT", "/api/form/draft", Some(json!({ "state": complete_state() }))).await;

    let (status, body) = send(&app, "POST", "/api/form/submit", Some(json!({ "state": complete_state() }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["data"]["price"], 18_500_000);
    assert_eq!(body["data"]["images"], json!(["https://cdn.test/208.jpg"]));
    assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_none());

    let (_, body) = send(&app, "GET", "/api/vehicles?make=peugeot", None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_submit_edit_updates_vehicle() {
    let (app, _) = create_test_app();
    let (_, opened) = send(&app, "POST", "/api/form/open", Some(json!({ "vehicle_id": 3 }))).await;

    let mut state = opened["state"].clone();
    state["fuelType"] = json!("Otro");
    state["customFuelType"] = json!("Híbrido");
    let (status, body) = send(&app, "POST", "/api/form/submit", Some(json!({ "state": state }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["fuelType"], "Híbrido");

    let (_, body) = send(&app, "GET", "/api/vehicles/3", None).await;
    assert_eq!(body["specifications"][6]["value"], "Híbrido");
}

#[tokio::test]
async fn test_optimize_image_endpoint() {
    let (app, _) = create_test_app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/images/optimize?url=https%3A%2F%2Fcdn.test%2Fa.jpg&w=100&h=80",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://images.weserv.nl/?url=cdn.test/a.jpg&w=100&h=80");

    let (_, body) = send(&app, "GET", "/api/images/optimize?url=no-es-url", None).await;
    assert_eq!(body["url"], "https://i.imgur.com/g2a4A0a.png");
}
