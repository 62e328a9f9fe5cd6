//! Configuración de cache
//!
//! Este módulo contiene la configuración del almacenamiento clave/valor
//! donde viven los borradores del formulario.

use serde::{Deserialize, Serialize};

/// Una semana: lo que sobrevive un borrador abandonado en Redis
pub const DEFAULT_DRAFT_TTL: u64 = 7 * 24 * 3600;

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub key_prefix: String,
    pub default_ttl: u64,
    /// Límite para conectar al arrancar, en segundos
    pub connect_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "rago_catalog".to_string(),
            default_ttl: DEFAULT_DRAFT_TTL,
            connect_timeout_secs: 5,
        }
    }
}
