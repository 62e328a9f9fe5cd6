//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores de validación del formulario (visibles para el usuario)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Por favor, añade al menos una URL de imagen.")]
    NoImages,

    #[error("Por favor, especifique el tipo de combustible cuando selecciona 'Otro'.")]
    MissingCustomFuelType,

    #[error("Valor inválido para {field}: '{value}'")]
    InvalidOption { field: &'static str, value: String },

    #[error("Índice de imagen {index} fuera de rango (hay {len})")]
    ImageIndexOutOfRange { index: usize, len: usize },
}

impl FormError {
    pub fn code(&self) -> &'static str {
        match self {
            FormError::NoImages => "NO_IMAGES",
            FormError::MissingCustomFuelType => "MISSING_CUSTOM_FUEL_TYPE",
            FormError::InvalidOption { .. } => "INVALID_OPTION",
            FormError::ImageIndexOutOfRange { .. } => "IMAGE_INDEX_OUT_OF_RANGE",
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::ExternalApi(e.to_string())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "No se pudo guardar el vehículo. Intenta de nuevo.".to_string(),
                        details: None,
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Form(e) => {
                warn!("⚠️ Form rejected: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Form Validation Error".to_string(),
                        message: e.to_string(),
                        details: None,
                        code: Some(e.code().to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::ExternalApi(msg) => {
                error!("❌ External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "No se pudo guardar el vehículo. Intenta de nuevo.".to_string(),
                        details: None,
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}
