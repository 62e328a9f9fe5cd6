//! Filtros y búsqueda del catálogo
//!
//! Composición conjuntiva de predicados sobre marca, año mínimo, precio máximo
//! y texto libre. Todo filtro vacío significa "sin restricción".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::vehicle::Vehicle;
use crate::utils::validation::{parse_threshold, sanitize_digits};

/// Filtros estructurados de la barra de filtros
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilters {
    pub make: String,
    /// Año mínimo ("desde")
    pub year: String,
    /// Precio máximo ("hasta")
    pub price: String,
}

impl CatalogFilters {
    pub fn set_make(&mut self, make: &str) {
        self.make = make.to_string();
    }

    pub fn set_year(&mut self, year: &str) {
        self.year = sanitize_digits(year);
    }

    pub fn set_price(&mut self, price: &str) {
        self.price = sanitize_digits(price);
    }

    /// "Limpiar Filtros": los tres a la vez; la búsqueda no se toca
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.make.trim().is_empty() && self.year.trim().is_empty() && self.price.trim().is_empty()
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let make = self.make.trim().to_lowercase();
        if !make.is_empty() && !vehicle.make.to_lowercase().contains(&make) {
            return false;
        }

        if let Some(min_year) = parse_threshold(&self.year) {
            if i64::from(vehicle.year) < min_year {
                return false;
            }
        }

        if let Some(max_price) = parse_threshold(&self.price) {
            if vehicle.price > max_price {
                return false;
            }
        }

        true
    }
}

/// El término coincide si es subcadena (sin distinguir mayúsculas) de marca,
/// modelo, descripción o "marca modelo"
pub fn matches_search(vehicle: &Vehicle, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    [
        vehicle.make.to_lowercase(),
        vehicle.model.to_lowercase(),
        vehicle.description.to_lowercase(),
        vehicle.title().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(&term))
}

/// Subconjunto del catálogo que cumple filtros y búsqueda, en el orden original
pub fn filter_catalog<'a>(vehicles: &'a [Vehicle], filters: &CatalogFilters, search: &str) -> Vec<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|vehicle| filters.matches(vehicle) && matches_search(vehicle, search))
        .collect()
}

/// Marcas distintas del catálogo, ordenadas (select de marca y sugerencias del formulario)
pub fn brands(vehicles: &[Vehicle]) -> Vec<String> {
    let mut unique: BTreeMap<String, String> = BTreeMap::new();
    for vehicle in vehicles {
        let make = vehicle.make.trim();
        if !make.is_empty() {
            unique.entry(make.to_lowercase()).or_insert_with(|| make.to_string());
        }
    }
    unique.into_values().collect()
}
