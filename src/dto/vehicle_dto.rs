use serde::{Deserialize, Serialize};

use crate::models::vehicle::Vehicle;
use crate::services::catalog_filter::CatalogFilters;
use crate::services::vehicle_views::VehicleCardView;
use crate::utils::image::ImageOptions;

/// Envoltorio estándar de respuestas exitosas
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Query del listado: filtros + búsqueda libre
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub make: String,
    pub year: String,
    pub price: String,
    pub search: String,
}

impl CatalogQuery {
    pub fn filters(&self) -> CatalogFilters {
        let mut filters = CatalogFilters::default();
        filters.set_make(&self.make);
        filters.set_year(&self.year);
        filters.set_price(&self.price);
        filters
    }
}

// Response del listado filtrado
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total: usize,
    pub filters: CatalogFilters,
    pub search: String,
    pub cards: Vec<VehicleCardView>,
    pub vehicles: Vec<Vehicle>,
    pub contact_link: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VehicleDetailQuery {
    pub image: Option<usize>,
}

// Query del adaptador de imágenes
#[derive(Debug, Deserialize)]
pub struct OptimizeQuery {
    pub url: String,
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub fit: Option<String>,
    pub blur: Option<u32>,
    pub output: Option<String>,
    pub q: Option<u32>,
}

impl OptimizeQuery {
    pub fn options(&self) -> ImageOptions {
        ImageOptions {
            w: self.w,
            h: self.h,
            fit: self.fit.clone(),
            blur: self.blur,
            output: self.output.clone(),
            q: self.q,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizedImageResponse {
    pub url: String,
}
