//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del catálogo y el payload normalizado
//! que el formulario entrega al colaborador de persistencia.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Tipo de transmisión - se serializa con el texto que ve el cliente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Transmission {
    #[serde(rename = "Automática")]
    Automatic,
    #[default]
    Manual,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automática",
            Transmission::Manual => "Manual",
        }
    }

    /// Interpretar el valor de un select; acepta también la forma sin tilde
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Automática" | "Automatica" => Some(Transmission::Automatic),
            "Manual" => Some(Transmission::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selección cerrada de combustible del formulario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FuelSelection {
    #[default]
    Nafta,
    Diesel,
    #[serde(rename = "GNC")]
    Gnc,
    Otro,
}

impl FuelSelection {
    /// Combustibles estándar (todo lo demás se edita como "Otro")
    pub const STANDARD: [FuelSelection; 3] = [FuelSelection::Nafta, FuelSelection::Diesel, FuelSelection::Gnc];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelSelection::Nafta => "Nafta",
            FuelSelection::Diesel => "Diesel",
            FuelSelection::Gnc => "GNC",
            FuelSelection::Otro => "Otro",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Nafta" => Some(FuelSelection::Nafta),
            "Diesel" => Some(FuelSelection::Diesel),
            "GNC" => Some(FuelSelection::Gnc),
            "Otro" => Some(FuelSelection::Otro),
            _ => None,
        }
    }

    /// Separar un combustible guardado en selección + texto libre
    pub fn split(fuel_type: &str) -> (Self, String) {
        match Self::STANDARD.iter().find(|fuel| fuel.as_str() == fuel_type) {
            Some(fuel) => (*fuel, String::new()),
            None => (FuelSelection::Otro, fuel_type.to_string()),
        }
    }
}

impl fmt::Display for FuelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle principal - tal como lo devuelve el almacenamiento del catálogo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: i64,
    pub engine: String,
    pub transmission: Transmission,
    #[serde(rename = "fuelType")]
    pub fuel_type: String,
    pub description: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Imagen de portada (índice 0)
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Payload normalizado que emite el formulario para crear o actualizar
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct VehicleFormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: i64,
    pub engine: String,
    pub transmission: Transmission,
    #[serde(rename = "fuelType")]
    pub fuel_type: String,
    pub description: String,
    #[validate(length(min = 1, message = "Se requiere al menos una URL de imagen"))]
    pub images: Vec<String>,
}

impl VehicleFormData {
    /// Materializar el vehículo con la identidad asignada por el almacenamiento
    pub fn into_vehicle(self, id: i64, created_at: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            engine: self.engine,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            description: self.description,
            images: self.images,
            created_at,
        }
    }
}
