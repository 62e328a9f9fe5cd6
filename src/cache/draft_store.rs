//! Borradores del formulario de alta
//!
//! Una única clave fija guarda el `FormState` serializado de un vehículo nuevo.
//! Toda falla de lectura o escritura se registra y se trata como "sin borrador":
//! el formulario nunca deja de abrirse por culpa del store. Cada operación
//! tiene un plazo; un store que no responde cuenta como falla.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::store::{KeyValueStore, StoreError};
use crate::models::form_state::FormState;

/// Clave fija del borrador de alta
pub const DRAFT_STORAGE_KEY: &str = "rago-new-vehicle-draft";

/// Plazo por operación sobre el store
pub const DEFAULT_DRAFT_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    timeout: Duration,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_DRAFT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T>(&self, operation: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| StoreError::Unavailable(format!("sin respuesta en {:?}", self.timeout)))?
    }

    /// Leer el borrador pendiente, si hay uno legible
    pub async fn load(&self) -> Option<FormState> {
        let raw = match self.bounded(self.store.get(DRAFT_STORAGE_KEY)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("📭 Sin borrador guardado");
                return None;
            }
            Err(e) => {
                warn!("⚠️ No se pudo leer el borrador: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<FormState>(&raw) {
            Ok(state) => {
                debug!("📥 Borrador recuperado");
                Some(state.sanitized())
            }
            Err(e) => {
                warn!("⚠️ Borrador corrupto, se ignora: {}", e);
                None
            }
        }
    }

    /// Guardar el borrador (best-effort)
    pub async fn save(&self, state: &FormState) {
        let serialized = match serde_json::to_string(state) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("⚠️ No se pudo serializar el borrador: {}", e);
                return;
            }
        };

        match self.bounded(self.store.set(DRAFT_STORAGE_KEY, &serialized)).await {
            Ok(()) => debug!("💾 Borrador guardado"),
            Err(e) => warn!("⚠️ No se pudo guardar el borrador: {}", e),
        }
    }

    /// Descartar el borrador (best-effort)
    pub async fn clear(&self) {
        match self.bounded(self.store.remove(DRAFT_STORAGE_KEY)).await {
            Ok(()) => debug!("🗑️ Borrador descartado"),
            Err(e) => warn!("⚠️ No se pudo descartar el borrador: {}", e),
        }
    }
}
