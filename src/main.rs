use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn, Level};
use dotenvy::dotenv;

use rago_catalog::cache::{CacheConfig, DraftStore, KeyValueStore, MemoryStore, RedisStore};
use rago_catalog::config::database::DatabaseConfig;
use rago_catalog::config::environment::EnvironmentConfig;
use rago_catalog::create_router;
use rago_catalog::repositories::{
    InMemoryVehicleRepository, PgVehicleRepository, SupabaseVehicleRepository, VehicleRepository,
};
use rago_catalog::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config.log_level.parse::<Level>().unwrap_or(Level::DEBUG);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 Rago Catalog - API del catálogo de vehículos");
    info!("================================================");

    let vehicles = build_repository(&config).await?;
    let drafts = DraftStore::new(build_store(&config).await);

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(config, vehicles, drafts));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🚗 Catálogo:");
    info!("   GET  /api/vehicles - Listar con filtros (make, year, price, search)");
    info!("   GET  /api/vehicles/brands - Marcas disponibles");
    info!("   GET  /api/vehicles/:id - Detalle del vehículo");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("📝 Formulario:");
    info!("   POST /api/form/open - Abrir formulario (alta o edición)");
    info!("   PUT  /api/form/draft - Guardar borrador");
    info!("   POST /api/form/action - Aplicar edición");
    info!("   POST /api/form/preview - Vista previa");
    info!("   POST /api/form/submit - Enviar formulario");
    info!("🖼️ Imágenes:");
    info!("   GET  /api/images/optimize - URL optimizada");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Elegir el repositorio: PostgreSQL, Supabase REST o memoria
async fn build_repository(config: &EnvironmentConfig) -> Result<Arc<dyn VehicleRepository>> {
    if let Some(url) = &config.database_url {
        let pool = match DatabaseConfig::new(url).create_pool().await {
            Ok(pool) => pool,
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {}", e);
                return Err(anyhow::anyhow!("Error de base de datos: {}", e));
            }
        };
        let repository = PgVehicleRepository::new(pool);
        repository.ensure_schema().await?;
        info!("✅ Catálogo en PostgreSQL");
        return Ok(Arc::new(repository));
    }

    if let Some((url, key)) = config.supabase_credentials() {
        info!("✅ Catálogo en Supabase: {}", url);
        return Ok(Arc::new(SupabaseVehicleRepository::new(url, key)));
    }

    warn!("⚠️ Sin DATABASE_URL ni SUPABASE_URL: catálogo en memoria");
    Ok(Arc::new(InMemoryVehicleRepository::new()))
}

/// Elegir el store de borradores: Redis si está configurado, si no memoria
async fn build_store(config: &EnvironmentConfig) -> Arc<dyn KeyValueStore> {
    let Some(redis_url) = &config.redis_url else {
        info!("📝 Borradores en memoria");
        return Arc::new(MemoryStore::new());
    };

    let cache_config = CacheConfig {
        redis_url: redis_url.clone(),
        default_ttl: config.draft_ttl_seconds,
        ..CacheConfig::default()
    };

    match RedisStore::new(cache_config).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("⚠️ Redis no disponible ({}), borradores en memoria", e);
            Arc::new(MemoryStore::new())
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
