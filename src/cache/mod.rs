//! Cache
//!
//! Almacenamiento clave-valor persistente: el equivalente del `localStorage`
//! del navegador para la wishlist y la caché legacy de reservas.

pub mod cache_config;
pub mod file_store;
pub mod key_value;
pub mod memory_store;
pub mod redis_client;

pub use cache_config::{CacheKeys, LEGACY_RESERVATIONS_KEY, WISHLIST_KEY};
pub use file_store::FileStore;
pub use key_value::{load_json, open_store, save_json, KeyValueStore, SharedStore, StorageError};
pub use memory_store::MemoryStore;
pub use redis_client::RedisClient;
