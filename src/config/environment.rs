//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{ConfigError, StorageBackend, StorageConfig};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    /// URL base del backend REST (`/cars`, `/Reservation`)
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub storage: StorageConfig,
    // Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    // Subida de imágenes
    pub media_upload_url: Option<String>,
    pub media_upload_preset: String,
    // Webhooks
    pub reservation_webhook_url: Option<String>,
    pub contact_webhook_url: Option<String>,
    // Admin
    pub admin_email: String,
    pub admin_password_hash: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración desde un mapa (tests y herramientas)
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |name: &str, default: &str| optional(name).unwrap_or_else(|| default.to_string());

        let environment = or_default("ENVIRONMENT", "development");
        let is_development = environment == "development";

        let api_base_url = optional("API_BASE_URL")
            .ok_or(ConfigError::Missing("API_BASE_URL"))?
            .trim_end_matches('/')
            .to_string();

        let jwt_secret = match optional("JWT_SECRET") {
            Some(secret) => secret,
            None if is_development => "autogo-development-secret-change-me".to_string(),
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let storage = StorageConfig {
            backend: parse_or("STORAGE_BACKEND", optional("STORAGE_BACKEND"), StorageBackend::File)?,
            directory: PathBuf::from(or_default("STORAGE_DIR", "./data")),
            redis_url: or_default("REDIS_URL", "redis://localhost:6379"),
            key_prefix: or_default("STORAGE_KEY_PREFIX", "autogo"),
        };

        Ok(Self {
            port: parse_or("PORT", optional("PORT"), 3000u16)?,
            host: or_default("HOST", "0.0.0.0"),
            log_level: or_default("LOG_LEVEL", "info"),
            cors_origins: optional("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            api_base_url,
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                optional("REQUEST_TIMEOUT_SECS"),
                15u64,
            )?),
            storage,
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_base_url: or_default(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            gemini_model: or_default("GEMINI_MODEL", "gemini-flash-latest"),
            media_upload_url: optional("MEDIA_UPLOAD_URL"),
            media_upload_preset: or_default("MEDIA_UPLOAD_PRESET", "cars_fill"),
            reservation_webhook_url: optional("RESERVATION_WEBHOOK_URL"),
            contact_webhook_url: optional("CONTACT_WEBHOOK_URL"),
            admin_email: or_default("ADMIN_EMAIL", "admin@autogo.com"),
            admin_password_hash: optional("ADMIN_PASSWORD_HASH"),
            jwt_secret,
            jwt_expiration: parse_or("JWT_EXPIRATION", optional("JWT_EXPIRATION"), 86_400u64)?,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> EnvironmentConfig {
    let mut values = HashMap::new();
    values.insert("API_BASE_URL".to_string(), "http://backend.test".to_string());
    values.insert("STORAGE_BACKEND".to_string(), "memory".to_string());
    EnvironmentConfig::from_map(&values).expect("test config")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_map(&values(&[("API_BASE_URL", "http://api.test/")])).unwrap();

        assert!(config.is_development());
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_base_url, "http://api.test");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.admin_email, "admin@autogo.com");
        assert!(config.gemini_api_key.is_none());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_missing_base_url() {
        let result = EnvironmentConfig::from_map(&values(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("API_BASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let result = EnvironmentConfig::from_map(&values(&[
            ("API_BASE_URL", "http://api.test"),
            ("PORT", "http"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "PORT", .. })));
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        let result = EnvironmentConfig::from_map(&values(&[
            ("API_BASE_URL", "http://api.test"),
            ("ENVIRONMENT", "production"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_cors_origins_split() {
        let config = EnvironmentConfig::from_map(&values(&[
            ("API_BASE_URL", "http://api.test"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}
