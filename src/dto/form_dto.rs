use serde::{Deserialize, Serialize};

use crate::models::form_state::FormState;
use crate::models::vehicle::Vehicle;
use crate::services::preview::PreviewMode;
use crate::services::vehicle_form::{FormAction, ImageSlot, VehicleForm};
use crate::services::vehicle_views::PreviewPanel;

// Request para abrir el formulario: sin id es alta, con id es edición
#[derive(Debug, Default, Deserialize)]
pub struct OpenFormRequest {
    pub vehicle_id: Option<i64>,
}

// Request con el estado completo que mantiene el cliente
#[derive(Debug, Deserialize)]
pub struct FormStateRequest {
    #[serde(default)]
    pub state: FormState,
}

// Request para aplicar una edición puntual
#[derive(Debug, Deserialize)]
pub struct FormActionRequest {
    #[serde(default)]
    pub state: FormState,
    pub action: FormAction,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub state: FormState,
    #[serde(default)]
    pub mode: PreviewMode,
}

// Response: foto del formulario abierto
#[derive(Debug, Serialize)]
pub struct FormSnapshot {
    pub title: &'static str,
    pub editing: bool,
    pub state: FormState,
    pub requires_custom_fuel: bool,
    pub image_slots: Vec<ImageSlot>,
    pub preview: Vehicle,
}

impl From<&VehicleForm> for FormSnapshot {
    fn from(form: &VehicleForm) -> Self {
        Self {
            title: form.mode().title(),
            editing: form.mode().is_edit(),
            state: form.state().clone(),
            requires_custom_fuel: form.requires_custom_fuel(),
            image_slots: form.image_slots(),
            preview: form.preview(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub mode: PreviewMode,
    pub entity: Vehicle,
    pub panel: PreviewPanel,
}
