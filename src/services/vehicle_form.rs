//! Motor del formulario de vehículos
//!
//! Máquina de estados del formulario de alta/edición. El modo se fija al abrir
//! y no cambia durante la sesión. En modo alta cada cambio se guarda como
//! borrador; en modo edición el borrador de alta pendiente se descarta al abrir.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::DraftStore;
use crate::models::form_state::{FormField, FormState, MoveDirection};
use crate::models::vehicle::{Vehicle, VehicleFormData};
use crate::services::preview::project_preview;
use crate::utils::errors::FormError;
use crate::utils::image::{thumbnail_url, PLACEHOLDER_IMAGE_URL};
use crate::utils::validation::{current_year, parse_digits};

/// Modo de la sesión, elegido al abrir
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Vehicle),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Añadir Vehículo",
            FormMode::Edit(_) => "Editar Vehículo",
        }
    }
}

/// Estado visual de la miniatura de un slot de imagen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum SlotPreview {
    /// "URL Vacía"
    Empty,
    /// "URL Inválida"
    Invalid,
    Ready(String),
}

impl SlotPreview {
    pub fn for_url(url: &str) -> Self {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return SlotPreview::Empty;
        }

        let thumbnail = thumbnail_url(trimmed);
        if thumbnail == PLACEHOLDER_IMAGE_URL && trimmed.starts_with("http") {
            SlotPreview::Invalid
        } else {
            SlotPreview::Ready(thumbnail)
        }
    }
}

/// Edición puntual sobre el formulario abierto
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    SetField { field: FormField, value: String },
    AddImage,
    UpdateImage { index: usize, value: String },
    RemoveImage { index: usize },
    MoveImage { index: usize, direction: MoveDirection },
}

/// Un slot de la lista de imágenes tal como se muestra en el formulario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSlot {
    pub index: usize,
    pub value: String,
    /// El slot 0 es la portada ("Principal") y el único obligatorio
    pub primary: bool,
    pub can_remove: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub preview: SlotPreview,
}

/// Sesión abierta del formulario
pub struct VehicleForm {
    mode: FormMode,
    state: FormState,
    drafts: DraftStore,
}

impl VehicleForm {
    /// Abrir el formulario aplicando el ciclo de vida del borrador
    pub async fn open(mode: FormMode, drafts: DraftStore) -> Self {
        let state = match &mode {
            FormMode::Edit(vehicle) => {
                drafts.clear().await;
                info!("✏️ Editando vehículo {}", vehicle.id);
                FormState::from_vehicle(vehicle)
            }
            FormMode::Create => drafts.load().await.unwrap_or_else(|| {
                debug!("🆕 Formulario de alta en blanco");
                FormState::fresh(current_year())
            }),
        };

        Self { mode, state, drafts }
    }

    /// Retomar una sesión con un estado ya existente (p.ej. el que envía el cliente).
    /// No toca el store al abrir; los cambios posteriores sí se guardan en modo alta.
    pub fn resume(mode: FormMode, state: FormState, drafts: DraftStore) -> Self {
        let mut state = state.sanitized();
        if let FormMode::Edit(vehicle) = &mode {
            state.id = Some(vehicle.id);
        } else {
            state.id = None;
        }
        Self { mode, state, drafts }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn requires_custom_fuel(&self) -> bool {
        self.state.requires_custom_fuel()
    }

    async fn autosave(&self) {
        if !self.mode.is_edit() {
            self.drafts.save(&self.state).await;
        }
    }

    /// Reemplazar el estado completo (sanitizado) y guardar
    pub async fn replace_state(&mut self, state: FormState) {
        let id = self.state.id;
        self.state = state.sanitized();
        self.state.id = id;
        self.autosave().await;
    }

    pub async fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        self.state.set_field(field, value)?;
        self.autosave().await;
        Ok(())
    }

    pub async fn add_image(&mut self) {
        self.state.add_image();
        self.autosave().await;
    }

    pub async fn update_image(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        self.state.update_image(index, value)?;
        self.autosave().await;
        Ok(())
    }

    pub async fn remove_image(&mut self, index: usize) -> bool {
        let changed = self.state.remove_image(index);
        if changed {
            self.autosave().await;
        }
        changed
    }

    pub async fn move_image(&mut self, index: usize, direction: MoveDirection) -> bool {
        let changed = self.state.move_image(index, direction);
        if changed {
            self.autosave().await;
        }
        changed
    }

    /// Aplicar una edición; devuelve si el estado cambió
    pub async fn apply(&mut self, action: FormAction) -> Result<bool, FormError> {
        match action {
            FormAction::SetField { field, value } => self.set_field(field, &value).await.map(|_| true),
            FormAction::AddImage => {
                self.add_image().await;
                Ok(true)
            }
            FormAction::UpdateImage { index, value } => self.update_image(index, &value).await.map(|_| true),
            FormAction::RemoveImage { index } => Ok(self.remove_image(index).await),
            FormAction::MoveImage { index, direction } => Ok(self.move_image(index, direction).await),
        }
    }

    pub fn image_slots(&self) -> Vec<ImageSlot> {
        let len = self.state.images.len();
        self.state
            .images
            .iter()
            .enumerate()
            .map(|(index, value)| ImageSlot {
                index,
                value: value.clone(),
                primary: index == 0,
                can_remove: len > 1,
                can_move_up: index > 0,
                can_move_down: index + 1 < len,
                preview: SlotPreview::for_url(value),
            })
            .collect()
    }

    /// Entidad de vista previa derivada del estado actual
    pub fn preview(&self) -> Vehicle {
        let original = match &self.mode {
            FormMode::Edit(vehicle) => Some(vehicle),
            FormMode::Create => None,
        };
        project_preview(&self.state, original)
    }

    /// Validar y normalizar al formato persistido, sin efectos secundarios
    pub fn to_persisted(&self) -> Result<VehicleFormData, FormError> {
        to_persisted_entity(&self.state, &self.mode)
    }

    /// Marcar el envío como exitoso: en modo alta descarta el borrador
    pub async fn complete_submission(&self) {
        if !self.mode.is_edit() {
            self.drafts.clear().await;
        }
    }

    /// Validar, normalizar y entregar el payload al colaborador.
    /// Si la validación falla, el estado queda intacto y no se llama a `on_submit`.
    pub async fn submit<F>(&mut self, on_submit: F) -> Result<(), FormError>
    where
        F: FnOnce(VehicleFormData),
    {
        let payload = self.to_persisted()?;
        self.complete_submission().await;
        info!("📤 Enviando vehículo {} {}", payload.make, payload.model);
        on_submit(payload);
        Ok(())
    }

    /// Cerrar sin efectos: un borrador de alta queda para la próxima apertura
    pub fn close(self) {
        debug!("🚪 Formulario cerrado");
    }
}

/// Conversión total del estado del formulario al payload persistido
pub fn to_persisted_entity(state: &FormState, mode: &FormMode) -> Result<VehicleFormData, FormError> {
    let images = state.filled_images();
    if images.is_empty() {
        return Err(FormError::NoImages);
    }

    let fuel_type = state.effective_fuel_type();
    if state.requires_custom_fuel() && fuel_type.is_empty() {
        return Err(FormError::MissingCustomFuelType);
    }

    let id = match mode {
        FormMode::Edit(vehicle) => Some(vehicle.id),
        FormMode::Create => None,
    };

    Ok(VehicleFormData {
        id,
        make: state.make.clone(),
        model: state.model.clone(),
        year: parse_digits(&state.year, i32::MAX),
        price: parse_digits(&state.price, i64::MAX),
        mileage: parse_digits(&state.mileage, i64::MAX),
        engine: state.engine.clone(),
        transmission: state.transmission,
        fuel_type,
        description: state.description.clone(),
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{KeyValueStore, MemoryStore, DRAFT_STORAGE_KEY};
    use crate::models::vehicle::{FuelSelection, Transmission};
    use chrono::Utc;
    use std::sync::Arc;

    fn drafts() -> (Arc<MemoryStore>, DraftStore) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), DraftStore::new(store))
    }

    fn existing() -> Vehicle {
        Vehicle {
            id: 42,
            make: "Toyota".into(),
            model: "Hilux".into(),
            year: 2019,
            price: 25_000_000,
            mileage: 80_000,
            engine: "2.8 TDI".into(),
            transmission: Transmission::Automatic,
            fuel_type: "Diesel".into(),
            description: "Única mano".into(),
            images: vec!["https://x.test/1.jpg".into(), "https://x.test/2.jpg".into()],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_mode_starts_fresh_with_current_year() {
        let (_, drafts) = drafts();
        let form = VehicleForm::open(FormMode::Create, drafts).await;
        assert_eq!(form.state().year, current_year().to_string());
        assert_eq!(form.state().images, vec![String::new()]);
        assert_eq!(form.mode().title(), "Añadir Vehículo");
    }

    #[tokio::test]
    async fn test_every_change_is_autosaved_in_create_mode() {
        let (store, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts.clone()).await;
        form.set_field(FormField::Make, "Fiat").await.unwrap();
        form.add_image().await;
        form.update_image(1, "https://x.test/b.jpg").await.unwrap();

        assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_some());
        assert_eq!(drafts.load().await.as_ref(), Some(form.state()));
    }

    #[tokio::test]
    async fn test_edit_mode_never_writes_drafts() {
        let (store, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Edit(existing()), drafts).await;
        form.set_field(FormField::Price, "1").await.unwrap();
        assert!(store.is_empty());
        assert_eq!(form.state().id, Some(42));
        assert_eq!(form.state().fuel_type, FuelSelection::Diesel);
    }

    #[tokio::test]
    async fn test_failed_image_update_does_not_save() {
        let (store, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts).await;
        assert!(form.update_image(9, "x").await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_images() {
        let (_, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts).await;
        form.update_image(0, "").await.unwrap();
        form.add_image().await;
        form.update_image(1, "  ").await.unwrap();
        let before = form.state().clone();

        let mut called = false;
        let result = form.submit(|_| called = true).await;
        assert_eq!(result, Err(FormError::NoImages));
        assert!(!called);
        assert_eq!(form.state(), &before);
    }

    #[tokio::test]
    async fn test_submit_requires_custom_fuel_for_otro() {
        let (_, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts).await;
        form.update_image(0, "https://x.test/a.jpg").await.unwrap();
        form.set_field(FormField::FuelType, "Otro").await.unwrap();
        form.set_field(FormField::CustomFuelType, "   ").await.unwrap();
        assert!(form.requires_custom_fuel());
        assert_eq!(form.submit(|_| {}).await, Err(FormError::MissingCustomFuelType));

        form.set_field(FormField::CustomFuelType, "Eléctrico").await.unwrap();
        let mut submitted = None;
        form.submit(|data| submitted = Some(data)).await.unwrap();
        assert_eq!(submitted.unwrap().fuel_type, "Eléctrico");
    }

    #[tokio::test]
    async fn test_submit_normalizes_and_clears_draft() {
        let (store, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts).await;
        form.set_field(FormField::Make, "Ford").await.unwrap();
        form.set_field(FormField::Price, "").await.unwrap();
        form.set_field(FormField::Mileage, "12.000 km").await.unwrap();
        form.update_image(0, "").await.unwrap();
        form.add_image().await;
        form.update_image(1, "https://x.test/b.jpg").await.unwrap();

        let mut submitted = None;
        form.submit(|data| submitted = Some(data)).await.unwrap();
        let data = submitted.unwrap();
        assert_eq!(data.id, None);
        assert_eq!(data.price, 0);
        assert_eq!(data.mileage, 12000);
        assert_eq!(data.images, vec!["https://x.test/b.jpg".to_string()]);
        assert_eq!(data.fuel_type, "Nafta");
        assert!(store.get(DRAFT_STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_edit_submission_keeps_id() {
        let (_, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Edit(existing()), drafts).await;
        let mut submitted = None;
        form.submit(|data| submitted = Some(data)).await.unwrap();
        let data = submitted.unwrap();
        assert_eq!(data.id, Some(42));
        assert_eq!(data.year, 2019);
        assert_eq!(data.images.len(), 2);
    }

    #[test]
    fn test_resume_forces_mode_identity() {
        let (_, drafts) = drafts();
        let state = FormState {
            id: Some(999),
            year: "19x99".into(),
            ..FormState::default()
        };
        let form = VehicleForm::resume(FormMode::Create, state.clone(), drafts.clone());
        assert_eq!(form.state().id, None);
        assert_eq!(form.state().year, "1999");

        let form = VehicleForm::resume(FormMode::Edit(existing()), state, drafts);
        assert_eq!(form.state().id, Some(42));
    }

    #[tokio::test]
    async fn test_image_slots() {
        let (_, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts).await;
        form.update_image(0, "https://x.test/a.jpg").await.unwrap();
        form.add_image().await;
        form.add_image().await;
        form.update_image(2, "http://").await.unwrap();

        let slots = form.image_slots();
        assert!(slots[0].primary);
        assert!(!slots[1].primary);
        assert!(!slots[0].can_move_up);
        assert!(!slots[2].can_move_down);
        assert!(matches!(slots[0].preview, SlotPreview::Ready(ref url) if url.contains("w=80&h=64")));
        assert_eq!(slots[1].preview, SlotPreview::Empty);
        assert_eq!(slots[2].preview, SlotPreview::Invalid);
    }

    #[tokio::test]
    async fn test_apply_actions_from_json() {
        let (_, drafts) = drafts();
        let mut form = VehicleForm::open(FormMode::Create, drafts.clone()).await;

        let action: FormAction =
            serde_json::from_str(r#"{"type":"set_field","field":"price","value":"12.500.000"}"#).unwrap();
        assert!(form.apply(action).await.unwrap());
        assert_eq!(form.state().price, "12500000");

        assert!(form.apply(FormAction::AddImage).await.unwrap());
        assert_eq!(form.state().images.len(), 2);
        assert!(!form.apply(FormAction::MoveImage { index: 0, direction: MoveDirection::Up }).await.unwrap());
        assert!(form.apply(FormAction::RemoveImage { index: 1 }).await.unwrap());
        assert!(!form.apply(FormAction::RemoveImage { index: 0 }).await.unwrap());

        let err = form
            .apply(FormAction::UpdateImage { index: 5, value: "x".into() })
            .await
            .unwrap_err();
        assert_eq!(err, FormError::ImageIndexOutOfRange { index: 5, len: 1 });
        assert_eq!(drafts.load().await.unwrap().price, "12500000");
    }
}
