//! Repositorio sobre la API REST de Supabase (PostgREST)

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use super::vehicle_repository::VehicleRepository;
use crate::models::vehicle::{Vehicle, VehicleFormData};
use crate::utils::errors::{not_found_error, AppError, AppResult};

const TABLE: &str = "vehicles";

pub struct SupabaseVehicleRepository {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseVehicleRepository {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_rows(&self, request: RequestBuilder) -> AppResult<Vec<Vehicle>> {
        let response = self.authorized(request).send().await?.error_for_status()?;
        Ok(response.json::<Vec<Vehicle>>().await?)
    }
}

fn without_id(mut data: VehicleFormData) -> VehicleFormData {
    data.id = None;
    data
}

#[async_trait]
impl VehicleRepository for SupabaseVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        debug!("📡 GET {}", self.table_url());
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.fetch_rows(request).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        Ok(self.fetch_rows(request).await?.into_iter().next())
    }

    async fn create(&self, data: VehicleFormData) -> AppResult<Vehicle> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&without_id(data));

        self.fetch_rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("Supabase no devolvió el vehículo creado".to_string()))
    }

    async fn update(&self, id: i64, data: VehicleFormData) -> AppResult<Vehicle> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&without_id(data));

        self.fetch_rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let request = self
            .client
            .delete(self.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation");

        if self.fetch_rows(request).await?.is_empty() {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}
