//! Adaptador de almacenamiento clave-valor
//!
//! Las operaciones son `get`/`set`/`remove` sobre strings, igual que el
//! `localStorage` del navegador. Los helpers JSON serializan valores completos:
//! no hay escrituras incrementales, cada `save_json` sobrescribe la clave.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

use super::{FileStore, MemoryStore, RedisClient};

/// Errores del almacenamiento
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error on key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Invalid key '{0}'")]
    InvalidKey(String),
}

/// Almacenamiento persistente de strings por clave
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Nombre del backend para logs
    fn backend_name(&self) -> &'static str;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Leer y deserializar un valor JSON
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Serializar y guardar un valor JSON (sobrescribe la clave completa)
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}

/// Abrir el backend configurado
pub async fn open_store(config: &StorageConfig) -> Result<SharedStore, StorageError> {
    let store: SharedStore = match config.backend {
        StorageBackend::File => Arc::new(FileStore::open(&config.directory).await?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Redis => Arc::new(RedisClient::new(config).await?),
    };

    info!("💾 Almacenamiento local: {}", store.backend_name());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: String,
        rank: u32,
    }

    #[tokio::test]
    async fn test_json_round_trip_preserves_order() {
        let store = MemoryStore::new();
        let items = vec![
            Item { id: "b".to_string(), rank: 2 },
            Item { id: "a".to_string(), rank: 1 },
            Item { id: "c".to_string(), rank: 3 },
        ];

        save_json(&store, "items", &items).await.unwrap();
        let loaded: Option<Vec<Item>> = load_json(&store, "items").await.unwrap();

        assert_eq!(loaded, Some(items));
    }

    #[tokio::test]
    async fn test_load_missing_and_corrupt() {
        let store = MemoryStore::new();
        let missing: Option<Vec<Item>> = load_json(&store, "nothing").await.unwrap();
        assert!(missing.is_none());

        store.set("broken", "{not json").await.unwrap();
        let result: Result<Option<Vec<Item>>, _> = load_json(&store, "broken").await;
        assert!(matches!(result, Err(StorageError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
