//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use std::borrow::Cow;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Mismo patrón que usa el formulario de contacto del frontend
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile");
}

/// Formato de fecha de calendario usado en todo el sistema
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value.trim()) {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Variante para `#[validate(custom = ...)]` sobre decimales
pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
}

/// Agregar un error con mensaje legible a la colección de errores de campo
pub fn push_field_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    mut error: ValidationError,
    message: &'static str,
) {
    error.message = Some(Cow::Borrowed(message));
    errors.add(field, error);
}

/// Convertir la colección de errores en `Result` según esté vacía o no
pub fn into_result<T>(value: T, errors: ValidationErrors) -> Result<T, ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}
