//! Calculadora de precio de reserva
//!
//! Funciones puras: duración en días enteros entre dos fechas de calendario
//! y total = duración × precio por día, con aritmética decimal exacta.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Vehicle;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::DATE_FORMAT;

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Días entre `start` y `end`; 0 si falta alguna fecha, no se puede leer
/// o `end` no es posterior a `start`.
pub fn rental_duration(start: &str, end: &str) -> i64 {
    match (parse_day(start), parse_day(end)) {
        (Some(start), Some(end)) if end > start => (end - start).num_days(),
        _ => 0,
    }
}

/// Total de la reserva (0 para duraciones no positivas)
pub fn total_price(duration: i64, price_per_day: Decimal) -> AppResult<Decimal> {
    if duration <= 0 {
        return Ok(Decimal::ZERO);
    }
    Decimal::from(duration)
        .checked_mul(price_per_day)
        .ok_or_else(|| validation_error("totalPrice", "Total price is out of range"))
}

/// Presupuesto mostrado junto al formulario
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub car_id: String,
    pub car_name: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_day: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl BookingQuote {
    pub fn for_vehicle(vehicle: &Vehicle, start_date: &str, end_date: &str) -> AppResult<Self> {
        let duration = rental_duration(start_date, end_date);
        Ok(Self {
            car_id: vehicle.id.clone(),
            car_name: vehicle.display_name(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            duration,
            price_per_day: vehicle.price_per_day,
            total_price: total_price(duration, vehicle.price_per_day)?,
        })
    }
}
