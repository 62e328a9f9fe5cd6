//! Repositorio en memoria
//!
//! Usado cuando no hay base de datos configurada y en los tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::vehicle_repository::VehicleRepository;
use crate::models::vehicle::{Vehicle, VehicleFormData};
use crate::utils::errors::{not_found_error, AppResult};

pub struct InMemoryVehicleRepository {
    vehicles: RwLock<Vec<Vehicle>>,
    next_id: AtomicI64,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::with_vehicles(Vec::new())
    }

    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        let next_id = vehicles.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        Self {
            vehicles: RwLock::new(vehicles),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let mut vehicles = self.vehicles.read().await.clone();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn create(&self, data: VehicleFormData) -> AppResult<Vehicle> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let vehicle = data.into_vehicle(id, Utc::now());
        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: i64, data: VehicleFormData) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let slot = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        *slot = data.into_vehicle(id, slot.created_at);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}
