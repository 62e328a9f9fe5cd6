use std::sync::Arc;
use tracing::{error, info};

use crate::cache::DraftStore;
use crate::dto::form_dto::{FormSnapshot, PreviewResponse};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::form_state::FormState;
use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleRepository;
use crate::services::preview::PreviewMode;
use crate::services::vehicle_form::{FormAction, FormMode, VehicleForm};
use crate::services::vehicle_views::PreviewPanel;
use crate::utils::errors::{not_found_error, AppError};

pub struct FormController {
    repository: Arc<dyn VehicleRepository>,
    drafts: DraftStore,
    contact_phone: String,
}

impl FormController {
    pub fn new(repository: Arc<dyn VehicleRepository>, drafts: DraftStore, contact_phone: &str) -> Self {
        Self {
            repository,
            drafts,
            contact_phone: contact_phone.to_string(),
        }
    }

    async fn load_vehicle(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    // El id del estado decide el modo: con id es edición de ese vehículo
    async fn mode_for(&self, state: &FormState) -> Result<FormMode, AppError> {
        match state.id {
            Some(id) => Ok(FormMode::Edit(self.load_vehicle(id).await?)),
            None => Ok(FormMode::Create),
        }
    }

    async fn resume(&self, state: FormState) -> Result<VehicleForm, AppError> {
        let mode = self.mode_for(&state).await?;
        Ok(VehicleForm::resume(mode, state, self.drafts.clone()))
    }

    /// Abrir el formulario; en edición se descarta el borrador de alta
    pub async fn open(&self, vehicle_id: Option<i64>) -> Result<FormSnapshot, AppError> {
        let mode = match vehicle_id {
            Some(id) => FormMode::Edit(self.load_vehicle(id).await?),
            None => FormMode::Create,
        };

        let form = VehicleForm::open(mode, self.drafts.clone()).await;
        Ok(FormSnapshot::from(&form))
    }

    /// Adoptar el estado del cliente como borrador de alta
    pub async fn save_draft(&self, state: FormState) -> Result<FormSnapshot, AppError> {
        let mut form = VehicleForm::resume(FormMode::Create, FormState::default(), self.drafts.clone());
        form.replace_state(state).await;
        Ok(FormSnapshot::from(&form))
    }

    pub async fn apply(&self, state: FormState, action: FormAction) -> Result<FormSnapshot, AppError> {
        let mut form = self.resume(state).await?;
        form.apply(action).await?;
        Ok(FormSnapshot::from(&form))
    }

    pub async fn preview(&self, state: FormState, mode: PreviewMode) -> Result<PreviewResponse, AppError> {
        let form = self.resume(state).await?;
        let entity = form.preview();
        let panel = PreviewPanel::render(&entity, mode, &self.contact_phone);

        Ok(PreviewResponse { mode, entity, panel })
    }

    /// Validar, normalizar y persistir. El borrador solo se descarta si el
    /// repositorio confirmó el alta.
    pub async fn submit(&self, state: FormState) -> Result<ApiResponse<Vehicle>, AppError> {
        let form = self.resume(state).await?;
        let payload = form.to_persisted()?;

        let result = match form.mode() {
            FormMode::Edit(original) => self.repository.update(original.id, payload).await,
            FormMode::Create => self.repository.create(payload).await,
        };

        let vehicle = result.map_err(|e| {
            error!("❌ No se pudo guardar el vehículo: {}", e);
            e
        })?;

        form.complete_submission().await;
        info!("📤 {} {} guardado con id {}", vehicle.make, vehicle.model, vehicle.id);

        let message = if form.mode().is_edit() {
            "Vehículo actualizado exitosamente"
        } else {
            "Vehículo creado exitosamente"
        };
        Ok(ApiResponse::success_with_message(vehicle, message.to_string()))
    }
}
