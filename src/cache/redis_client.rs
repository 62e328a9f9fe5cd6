use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::{debug, info};

use super::store::{KeyValueStore, StoreError};
use super::CacheConfig;

/// Store de borradores respaldado por Redis (ConnectionManager async)
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisStore {
    /// Crear nuevo cliente Redis y verificar la conexión
    pub async fn new(config: CacheConfig) -> Result<Self, StoreError> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let connect = async {
            let manager = ConnectionManager::new(client).await?;
            let mut conn = manager.clone();
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, StoreError>(manager)
        };

        let manager = tokio::time::timeout(Duration::from_secs(config.connect_timeout_secs), connect)
            .await
            .map_err(|_| StoreError::Unavailable(format!("sin respuesta de {}", config.redis_url)))??;

        info!("✅ Redis conectado exitosamente");
        Ok(Self { manager, config })
    }

    /// Generar clave con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = self.make_key(key);
        let mut conn = self.manager.clone();
        let value: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut conn).await?;
        match &value {
            Some(_) => debug!("📥 Cache HIT para clave: {}", key),
            None => debug!("❌ Cache MISS para clave: {}", key),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let key = self.make_key(key);
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(&key)
            .arg(value)
            .arg("EX")
            .arg(self.config.default_ttl)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, self.config.default_ttl);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let key = self.make_key(key);
        let mut conn = self.manager.clone();
        let count: i64 = redis::cmd("DEL").arg(&key).query_async(&mut conn).await?;
        debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count);
        Ok(())
    }
}
