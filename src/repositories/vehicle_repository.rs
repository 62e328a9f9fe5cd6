use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::vehicle::{Transmission, Vehicle, VehicleFormData};
use crate::utils::errors::{not_found_error, AppError, AppResult};

const SCHEMA: &str = include_str!("../../migrations/001_create_vehicles.sql");

/// Colaborador de persistencia del catálogo
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;
    async fn create(&self, data: VehicleFormData) -> AppResult<Vehicle>;
    async fn update(&self, id: i64, data: VehicleFormData) -> AppResult<Vehicle>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

// Fila tal cual está en la tabla vehicles
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    make: String,
    model: String,
    year: i32,
    price: i64,
    mileage: i64,
    engine: String,
    transmission: String,
    #[sqlx(rename = "fuelType")]
    fuel_type: String,
    description: String,
    images: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        let transmission = Transmission::parse(&row.transmission).unwrap_or_else(|| {
            warn!("⚠️ Transmisión desconocida '{}' en vehículo {}", row.transmission, row.id);
            Transmission::default()
        });

        Vehicle {
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
            price: row.price,
            mileage: row.mileage,
            engine: row.engine,
            transmission,
            fuel_type: row.fuel_type,
            description: row.description,
            images: row.images,
            created_at: row.created_at,
        }
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la tabla si todavía no existe
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        info!("✅ Tabla vehicles verificada");
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn create(&self, data: VehicleFormData) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (make, model, year, price, mileage, engine, transmission, "fuelType", description, images, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(data.make)
        .bind(data.model)
        .bind(data.year)
        .bind(data.price)
        .bind(data.mileage)
        .bind(data.engine)
        .bind(data.transmission.as_str())
        .bind(data.fuel_type)
        .bind(data.description)
        .bind(data.images)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, data: VehicleFormData) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, year = $4, price = $5, mileage = $6, engine = $7,
                transmission = $8, "fuelType" = $9, description = $10, images = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.make)
        .bind(data.model)
        .bind(data.year)
        .bind(data.price)
        .bind(data.mileage)
        .bind(data.engine)
        .bind(data.transmission.as_str())
        .bind(data.fuel_type)
        .bind(data.description)
        .bind(data.images)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::from).ok_or_else(|| not_found_error("Vehicle", id))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}
