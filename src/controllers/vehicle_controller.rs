use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::vehicle_dto::{ApiResponse, CatalogQuery, CatalogResponse};
use crate::models::vehicle::{Vehicle, VehicleFormData};
use crate::repositories::VehicleRepository;
use crate::services::carousel::ImageCarousel;
use crate::services::catalog_filter::{brands, filter_catalog};
use crate::services::contact::general_contact_link;
use crate::services::vehicle_views::{VehicleCardView, VehicleDetailView};
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    contact_phone: String,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>, contact_phone: &str) -> Self {
        Self {
            repository,
            contact_phone: contact_phone.to_string(),
        }
    }

    pub async fn list(&self, query: CatalogQuery) -> Result<CatalogResponse, AppError> {
        let all = self.repository.list().await?;
        let filters = query.filters();

        let matching: Vec<Vehicle> = filter_catalog(&all, &filters, &query.search)
            .into_iter()
            .cloned()
            .collect();

        info!("🚗 Catálogo: {} de {} vehículos", matching.len(), all.len());

        Ok(CatalogResponse {
            total: matching.len(),
            filters,
            search: query.search,
            cards: matching.iter().map(VehicleCardView::from).collect(),
            vehicles: matching,
            contact_link: general_contact_link(&self.contact_phone),
        })
    }

    pub async fn brands(&self) -> Result<Vec<String>, AppError> {
        let all = self.repository.list().await?;
        Ok(brands(&all))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    /// Detalle con el carrusel posicionado en `image`
    pub async fn detail(&self, id: i64, image: Option<usize>) -> Result<VehicleDetailView, AppError> {
        let vehicle = self.get_by_id(id).await?;

        let mut carousel = ImageCarousel::new(vehicle.images.clone());
        if let Some(index) = image {
            if !carousel.go_to(index) {
                warn!("⚠️ Imagen {} fuera de rango para vehículo {}", index, id);
            }
        }

        Ok(VehicleDetailView::new(&vehicle, &carousel, &self.contact_phone))
    }

    pub async fn create(&self, request: VehicleFormData) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let vehicle = self.repository.create(request).await?;
        info!("✅ Vehículo {} creado", vehicle.id);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(&self, id: i64, request: VehicleFormData) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let vehicle = self.repository.update(id, request).await?;
        info!("✅ Vehículo {} actualizado", vehicle.id);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}
