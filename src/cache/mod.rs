//! Cache
//!
//! Este módulo contiene el almacenamiento clave/valor y los borradores
//! del formulario de vehículos.

pub mod cache_config;
pub mod draft_store;
pub mod redis_client;
pub mod store;

pub use cache_config::CacheConfig;
pub use draft_store::{DraftStore, DRAFT_STORAGE_KEY};
pub use redis_client::RedisStore;
pub use store::{KeyValueStore, MemoryStore, StoreError};
