//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::cache::DraftStore;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::VehicleRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub drafts: DraftStore,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, vehicles: Arc<dyn VehicleRepository>, drafts: DraftStore) -> Self {
        Self { config, vehicles, drafts }
    }
}
