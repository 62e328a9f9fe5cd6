//! Estado del formulario de vehículos
//!
//! Espejo editable de `Vehicle`: los campos numéricos se guardan como cadenas
//! de dígitos sin parsear y el combustible se separa en selección + texto libre.
//! Todas las reglas de sanitización viven acá.

use serde::{Deserialize, Serialize};

use super::vehicle::{FuelSelection, Transmission, Vehicle};
use crate::utils::errors::FormError;
use crate::utils::validation::sanitize_digits;

/// Campos editables del formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Make,
    Model,
    Year,
    Price,
    Mileage,
    Engine,
    Transmission,
    FuelType,
    CustomFuelType,
    Description,
}

impl FormField {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FormField::Year | FormField::Price | FormField::Mileage)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Make => "make",
            FormField::Model => "model",
            FormField::Year => "year",
            FormField::Price => "price",
            FormField::Mileage => "mileage",
            FormField::Engine => "engine",
            FormField::Transmission => "transmission",
            FormField::FuelType => "fuelType",
            FormField::CustomFuelType => "customFuelType",
            FormField::Description => "description",
        }
    }
}

/// Dirección para reordenar imágenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub mileage: String,
    pub engine: String,
    pub transmission: Transmission,
    pub fuel_type: FuelSelection,
    pub custom_fuel_type: String,
    pub description: String,
    pub images: Vec<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            id: None,
            make: String::new(),
            model: String::new(),
            year: String::new(),
            price: String::new(),
            mileage: String::new(),
            engine: String::new(),
            transmission: Transmission::Manual,
            fuel_type: FuelSelection::Nafta,
            custom_fuel_type: String::new(),
            description: String::new(),
            images: vec![String::new()],
        }
    }
}

impl FormState {
    /// Estado inicial para un vehículo nuevo, con el año precargado
    pub fn fresh(current_year: i32) -> Self {
        Self {
            year: current_year.to_string(),
            ..Self::default()
        }
    }

    /// Cargar todos los campos de un vehículo existente (modo edición)
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        let (fuel_type, custom_fuel_type) = FuelSelection::split(&vehicle.fuel_type);
        let images = if vehicle.images.is_empty() {
            vec![String::new()]
        } else {
            vehicle.images.clone()
        };

        Self {
            id: Some(vehicle.id),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.to_string(),
            price: vehicle.price.to_string(),
            mileage: vehicle.mileage.to_string(),
            engine: vehicle.engine.clone(),
            transmission: vehicle.transmission,
            fuel_type,
            custom_fuel_type,
            description: vehicle.description.clone(),
            images,
        }
    }

    /// Re-aplicar las reglas de sanitización a un estado recibido de afuera
    pub fn sanitized(mut self) -> Self {
        self.year = sanitize_digits(&self.year);
        self.price = sanitize_digits(&self.price);
        self.mileage = sanitize_digits(&self.mileage);
        if self.images.is_empty() {
            self.images.push(String::new());
        }
        self
    }

    pub fn requires_custom_fuel(&self) -> bool {
        self.fuel_type == FuelSelection::Otro
    }

    /// Combustible efectivo: el texto libre recortado cuando la selección es "Otro"
    pub fn effective_fuel_type(&self) -> String {
        if self.requires_custom_fuel() {
            self.custom_fuel_type.trim().to_string()
        } else {
            self.fuel_type.as_str().to_string()
        }
    }

    /// Imágenes no vacías, recortadas, en orden
    pub fn filled_images(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|image| image.trim())
            .filter(|image| !image.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Sobrescribir un campo; los numéricos se quedan solo con dígitos
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        match field {
            FormField::Make => self.make = value.to_string(),
            FormField::Model => self.model = value.to_string(),
            FormField::Year => self.year = sanitize_digits(value),
            FormField::Price => self.price = sanitize_digits(value),
            FormField::Mileage => self.mileage = sanitize_digits(value),
            FormField::Engine => self.engine = value.to_string(),
            FormField::Transmission => {
                self.transmission = Transmission::parse(value).ok_or_else(|| FormError::InvalidOption {
                    field: field.name(),
                    value: value.to_string(),
                })?;
            }
            FormField::FuelType => {
                self.fuel_type = FuelSelection::parse(value).ok_or_else(|| FormError::InvalidOption {
                    field: field.name(),
                    value: value.to_string(),
                })?;
            }
            FormField::CustomFuelType => self.custom_fuel_type = value.to_string(),
            FormField::Description => self.description = value.to_string(),
        }
        Ok(())
    }

    /// Agregar un slot vacío al final
    pub fn add_image(&mut self) {
        self.images.push(String::new());
    }

    pub fn update_image(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        let len = self.images.len();
        let slot = self
            .images
            .get_mut(index)
            .ok_or(FormError::ImageIndexOutOfRange { index, len })?;
        *slot = value.to_string();
        Ok(())
    }

    /// Eliminar un slot; nunca deja la lista vacía. Devuelve si hubo cambio.
    pub fn remove_image(&mut self, index: usize) -> bool {
        if self.images.len() <= 1 || index >= self.images.len() {
            return false;
        }
        self.images.remove(index);
        true
    }

    /// Intercambiar con el vecino en la dirección dada. Devuelve si hubo cambio.
    pub fn move_image(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };

        match target {
            Some(target) if index < self.images.len() && target < self.images.len() => {
                self.images.swap(index, target);
                true
            }
            _ => false,
        }
    }
}
