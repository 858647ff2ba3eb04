//! Modelo de Reservation
//!
//! Reservas tal como las guarda el backend (`/Reservation`), el borrador
//! temporal del formulario y el esquema de validación del formulario.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

use crate::services::pricing_service::rental_duration;
use crate::utils::ids::string_or_number;
use crate::utils::validation::{
    into_result, push_field_error, validate_date, validate_email, validate_not_empty,
};

/// Estado de una reserva
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Transiciones que el panel de admin permite.
    ///
    /// `pending` es el estado inicial; `confirmed` y `cancelled` son
    /// alcanzables entre sí y ninguno de los dos es terminal. No existe
    /// vuelta a `pending`.
    pub fn can_transition_to(&self, target: ReservationStatus) -> bool {
        matches!(
            (self, target),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
                | (ReservationStatus::Cancelled, ReservationStatus::Confirmed)
                | (ReservationStatus::Confirmed, ReservationStatus::Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status '{}'", other)),
        }
    }
}

/// Reserva - mapea exactamente al recurso `/Reservation` del backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Id temporal (timestamp) hasta que el backend asigna el definitivo
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub car_id: String,
    pub car_name: String,
    #[serde(default)]
    pub car_image: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl Reservation {
    /// Búsqueda del panel de admin: cliente, email o coche
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.customer_name.to_lowercase().contains(&term)
            || self.customer_email.to_lowercase().contains(&term)
            || self.car_name.to_lowercase().contains(&term)
    }

    /// Copia completa con el estado cambiado (el backend recibe el objeto entero)
    pub fn with_status(&self, status: ReservationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Contadores por estado mostrados al pie del listado de admin
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ReservationStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

impl ReservationStats {
    pub fn from_reservations<'a, I>(reservations: I) -> Self
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        reservations
            .into_iter()
            .fold(Self::default(), |mut stats, reservation| {
                stats.total += 1;
                match reservation.status {
                    ReservationStatus::Pending => stats.pending += 1,
                    ReservationStatus::Confirmed => stats.confirmed += 1,
                    ReservationStatus::Cancelled => stats.cancelled += 1,
                }
                stats
            })
    }
}

/// Borrador del formulario de reserva (sólo memoria)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Formulario de reserva tal como lo envía la UI (todo strings)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Formulario ya validado y tipado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReservationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: i64,
}

impl ReservationForm {
    /// Duración en días según las fechas del formulario (0 si no es válida)
    pub fn duration(&self) -> i64 {
        rental_duration(&self.start_date, &self.end_date)
    }

    /// Condición que habilita el botón "Continue to Payment"
    pub fn is_valid(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.start_date, &self.end_date]
            .iter()
            .all(|field| !field.trim().is_empty())
            && self.duration() > 0
    }

    /// Validación completa antes de tocar estado o red.
    ///
    /// `today` es el primer día reservable (el formulario no permite fechas pasadas).
    pub fn parse(&self, today: NaiveDate) -> Result<ParsedReservationForm, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if validate_not_empty(&self.name).is_err() {
            push_field_error(&mut errors, "name", ValidationError::new("required"), "Full name is required");
        }

        if validate_not_empty(&self.email).is_err() {
            push_field_error(&mut errors, "email", ValidationError::new("required"), "Email is required");
        } else if let Err(e) = validate_email(&self.email) {
            push_field_error(&mut errors, "email", e, "Invalid email format");
        }

        if validate_not_empty(&self.phone).is_err() {
            push_field_error(&mut errors, "phone", ValidationError::new("required"), "Phone number is required");
        }

        let start = match validate_date(&self.start_date) {
            Ok(date) if date < today => {
                push_field_error(&mut errors, "startDate", ValidationError::new("past"), "Start date cannot be in the past");
                None
            }
            Ok(date) => Some(date),
            Err(e) => {
                push_field_error(&mut errors, "startDate", e, "Start date is required");
                None
            }
        };

        let end = match validate_date(&self.end_date) {
            Ok(date) => Some(date),
            Err(e) => {
                push_field_error(&mut errors, "endDate", e, "End date is required");
                None
            }
        };

        let duration = self.duration();
        if let (Some(_), Some(_)) = (start, end) {
            if duration <= 0 {
                push_field_error(
                    &mut errors,
                    "endDate",
                    ValidationError::new("duration"),
                    "End date must be after start date",
                );
            }
        }

        match (start, end) {
            (Some(start_date), Some(end_date)) if duration > 0 => into_result(
                ParsedReservationForm {
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    phone: self.phone.trim().to_string(),
                    start_date,
                    end_date,
                    duration,
                },
                errors,
            ),
            _ => Err(errors),
        }
    }
}

impl From<ReservationDraft> for ReservationForm {
    fn from(draft: ReservationDraft) -> Self {
        Self {
            name: draft.customer_name,
            email: draft.customer_email,
            phone: draft.customer_phone,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }
}

impl From<ReservationForm> for ReservationDraft {
    fn from(form: ReservationForm) -> Self {
        Self {
            customer_name: form.name,
            customer_email: form.email,
            customer_phone: form.phone,
            start_date: form.start_date,
            end_date: form.end_date,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_reservation(id: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        id: id.to_string(),
        car_id: "7".to_string(),
        car_name: "Audi A3".to_string(),
        car_image: "https://img.test/7.jpg".to_string(),
        customer_name: "John Doe".to_string(),
        customer_email: "john@example.com".to_string(),
        customer_phone: "+212612345678".to_string(),
        start_date: "2025-01-01".to_string(),
        end_date: "2025-01-04".to_string(),
        duration: 3,
        total_price: Decimal::from(600),
        status,
    }
}
