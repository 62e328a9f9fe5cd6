//! Vista previa en vivo
//!
//! Proyección pura y total del estado del formulario a un `Vehicle` completo:
//! todo campo vacío o no parseable se reemplaza por un placeholder legible.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::form_state::FormState;
use crate::models::vehicle::Vehicle;
use crate::utils::image::PLACEHOLDER_IMAGE_URL;
use crate::utils::validation::{current_year, parse_digits};

pub const PLACEHOLDER_MAKE: &str = "Marca";
pub const PLACEHOLDER_MODEL: &str = "Modelo";
pub const PLACEHOLDER_ENGINE: &str = "Motor";
pub const PLACEHOLDER_FUEL: &str = "Combustible";
pub const PLACEHOLDER_DESCRIPTION: &str = "Descripción del vehículo.";

/// Modo de la vista previa; cambiarlo no toca el estado del formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    #[default]
    Card,
    Detail,
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Proyectar el estado del formulario. `original` es el vehículo en edición.
pub fn project_preview(state: &FormState, original: Option<&Vehicle>) -> Vehicle {
    let images = state.filled_images();
    let images = if images.is_empty() {
        vec![PLACEHOLDER_IMAGE_URL.to_string()]
    } else {
        images
    };

    let year = match parse_digits::<i32>(&state.year, i32::MAX) {
        0 => current_year(),
        year => year,
    };

    Vehicle {
        id: original.map(|v| v.id).unwrap_or(0),
        make: or_placeholder(&state.make, PLACEHOLDER_MAKE),
        model: or_placeholder(&state.model, PLACEHOLDER_MODEL),
        year,
        price: parse_digits(&state.price, i64::MAX),
        mileage: parse_digits(&state.mileage, i64::MAX),
        engine: or_placeholder(&state.engine, PLACEHOLDER_ENGINE),
        transmission: state.transmission,
        fuel_type: or_placeholder(&state.effective_fuel_type(), PLACEHOLDER_FUEL),
        description: or_placeholder(&state.description, PLACEHOLDER_DESCRIPTION),
        images,
        created_at: original.map(|v| v.created_at).unwrap_or_else(Utc::now),
    }
}
