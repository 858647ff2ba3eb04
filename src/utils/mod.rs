//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y deserialización tolerante de los payloads del backend.

pub mod errors;
pub mod ids;
pub mod validation;

pub use errors::{AppError, AppResult};
