use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::{debug, info};

use crate::config::StorageConfig;

use super::{CacheKeys, KeyValueStore, StorageError};

/// Cliente Redis con connection manager compartido entre instancias
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    keys: CacheKeys,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self {
            manager,
            keys: CacheKeys::new(config.key_prefix.clone()),
        })
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(self.keys.make_key(key)).await?;
        debug!("📥 Redis GET {} ({})", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let _: () = conn.set(self.keys.make_key(key), value).await?;
        debug!("💾 Redis SET {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(self.keys.make_key(key)).await?;
        debug!("🗑️ Redis DEL {}", key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
