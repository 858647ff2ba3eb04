//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del almacenamiento local, variables
//! de entorno y otras configuraciones del sistema.

pub mod environment;
pub mod storage;

pub use environment::*;
pub use storage::*;

use thiserror::Error;

/// Errores de configuración
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}
