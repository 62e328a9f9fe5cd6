//! Repositorios del catálogo
//!
//! Implementaciones del colaborador de persistencia: PostgreSQL (sqlx),
//! Supabase REST y memoria.

pub mod memory_repository;
pub mod supabase_repository;
pub mod vehicle_repository;

pub use memory_repository::InMemoryVehicleRepository;
pub use supabase_repository::SupabaseVehicleRepository;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
