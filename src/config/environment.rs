//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::Context;
use std::env;

use crate::cache::cache_config::DEFAULT_DRAFT_TTL;
use crate::services::contact::DEFAULT_CONTACT_PHONE;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub redis_url: Option<String>,
    pub draft_ttl_seconds: u64,
    pub contact_phone: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: None,
            supabase_url: None,
            supabase_anon_key: None,
            redis_url: None,
            draft_ttl_seconds: DEFAULT_DRAFT_TTL,
            contact_phone: DEFAULT_CONTACT_PHONE.to_string(),
            cors_origins: Vec::new(),
            log_level: "debug".to_string(),
        }
    }
}

// Variable presente y no vacía
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno; lo que falta toma el valor por defecto
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match optional_var("PORT") {
            Some(port) => port.parse().with_context(|| format!("PORT inválido: '{}'", port))?,
            None => defaults.port,
        };

        let draft_ttl_seconds = match optional_var("DRAFT_TTL_SECONDS") {
            Some(ttl) => ttl
                .parse()
                .with_context(|| format!("DRAFT_TTL_SECONDS inválido: '{}'", ttl))?,
            None => defaults.draft_ttl_seconds,
        };

        let cors_origins = optional_var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: optional_var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: optional_var("HOST").unwrap_or(defaults.host),
            database_url: optional_var("DATABASE_URL"),
            supabase_url: optional_var("SUPABASE_URL"),
            supabase_anon_key: optional_var("SUPABASE_ANON_KEY"),
            redis_url: optional_var("REDIS_URL"),
            draft_ttl_seconds,
            contact_phone: optional_var("CONTACT_PHONE").unwrap_or(defaults.contact_phone),
            cors_origins,
            log_level: optional_var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credenciales de Supabase, solo si están las dos
    pub fn supabase_credentials(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}
