//! Configuración del almacenamiento local
//!
//! Equivalente del `localStorage` del navegador: decide dónde se persisten
//! la wishlist y la caché legacy de reservas.

use std::path::PathBuf;
use std::str::FromStr;

use super::ConfigError;

/// Backend de almacenamiento clave-valor
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// Un fichero JSON por clave dentro de un directorio
    File,
    /// Sólo memoria, se pierde al reiniciar
    Memory,
    /// Redis compartido entre instancias
    Redis,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            "redis" => Ok(StorageBackend::Redis),
            _ => Err(ConfigError::Invalid {
                name: "STORAGE_BACKEND",
                value: value.to_string(),
            }),
        }
    }
}

/// Configuración del almacenamiento
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub directory: PathBuf,
    pub redis_url: String,
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            directory: PathBuf::from("./data"),
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "autogo".to_string(),
        }
    }
}
