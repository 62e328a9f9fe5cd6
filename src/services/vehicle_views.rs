//! Modelos de vista: tarjeta del catálogo y detalle del vehículo
//!
//! Ambas vistas consumen el mismo `Vehicle`, sea uno persistido o la
//! proyección de la vista previa del formulario.

use serde::Serialize;

use crate::models::vehicle::Vehicle;
use crate::services::carousel::{CarouselFrame, ImageCarousel};
use crate::services::contact::vehicle_contact_link;
use crate::services::preview::PreviewMode;
use crate::utils::format::{format_mileage, format_price};
use crate::utils::image::{ResponsiveImage, CARD_PROFILE};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCardView {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub price: String,
    pub mileage: String,
    pub transmission: String,
    pub image: ResponsiveImage,
}

impl From<&Vehicle> for VehicleCardView {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            title: vehicle.title(),
            year: vehicle.year,
            price: format_price(vehicle.price),
            mileage: format_mileage(vehicle.mileage),
            transmission: vehicle.transmission.to_string(),
            image: CARD_PROFILE.build(vehicle.cover_image().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificationItem {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetailView {
    pub id: i64,
    pub title: String,
    pub carousel: CarouselFrame,
    pub description: String,
    pub specifications: Vec<SpecificationItem>,
    pub price: String,
    pub contact_link: String,
}

impl VehicleDetailView {
    pub fn new(vehicle: &Vehicle, carousel: &ImageCarousel, contact_phone: &str) -> Self {
        let specifications = vec![
            SpecificationItem { label: "Marca", value: vehicle.make.clone() },
            SpecificationItem { label: "Modelo", value: vehicle.model.clone() },
            SpecificationItem { label: "Año", value: vehicle.year.to_string() },
            SpecificationItem { label: "Kilometraje", value: format_mileage(vehicle.mileage) },
            SpecificationItem { label: "Motor", value: vehicle.engine.clone() },
            SpecificationItem { label: "Transmisión", value: vehicle.transmission.to_string() },
            SpecificationItem { label: "Combustible", value: vehicle.fuel_type.clone() },
        ];

        Self {
            id: vehicle.id,
            title: vehicle.title(),
            carousel: carousel.frame(),
            description: vehicle.description.clone(),
            specifications,
            price: format_price(vehicle.price),
            contact_link: vehicle_contact_link(contact_phone, &vehicle.make, &vehicle.model),
        }
    }

    /// Detalle con el carrusel en la primera imagen
    pub fn first_image(vehicle: &Vehicle, contact_phone: &str) -> Self {
        Self::new(vehicle, &ImageCarousel::new(vehicle.images.clone()), contact_phone)
    }
}

/// Panel de vista previa del formulario en el modo elegido
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "view", rename_all = "lowercase")]
pub enum PreviewPanel {
    Card(VehicleCardView),
    Detail(VehicleDetailView),
}

impl PreviewPanel {
    pub fn render(vehicle: &Vehicle, mode: PreviewMode, contact_phone: &str) -> Self {
        match mode {
            PreviewMode::Card => PreviewPanel::Card(VehicleCardView::from(vehicle)),
            PreviewMode::Detail => PreviewPanel::Detail(VehicleDetailView::first_image(vehicle, contact_phone)),
        }
    }
}
