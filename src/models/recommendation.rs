//! Preferencias del asistente de recomendación

use serde::{Deserialize, Serialize};

use crate::models::vehicle::Vehicle;

/// Preferencias elegidas por el usuario en el formulario de recomendación
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserPreferences {
    pub budget: String,
    pub purpose: String,
    pub seats: String,
    pub fuel: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            budget: "Economy".to_string(),
            purpose: "Daily Commute".to_string(),
            seats: "5".to_string(),
            fuel: "Petrol".to_string(),
        }
    }
}

/// Opciones ofrecidas por el formulario
pub const BUDGET_OPTIONS: [&str; 4] = ["Economy", "Family", "Premium", "Luxury"];
pub const PURPOSE_OPTIONS: [&str; 4] = ["Daily Commute", "Family Trip", "Business", "Adventure"];
pub const SEAT_OPTIONS: [&str; 4] = ["2", "4", "5", "7+"];
pub const FUEL_OPTIONS: [&str; 4] = ["Petrol", "Diesel", "Electric", "Hybrid"];

/// Vista reducida de un vehículo que se envía al modelo de IA
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationCandidate<'a> {
    pub id: &'a str,
    pub brand: &'a str,
    pub model: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: rust_decimal::Decimal,
    pub category: &'a str,
    pub fuel: &'static str,
    pub seats: u32,
    pub description: &'a str,
}

impl<'a> From<&'a Vehicle> for RecommendationCandidate<'a> {
    fn from(vehicle: &'a Vehicle) -> Self {
        Self {
            id: &vehicle.id,
            brand: &vehicle.brand,
            model: &vehicle.model,
            price: vehicle.price_per_day,
            category: &vehicle.category,
            fuel: vehicle.fuel.as_str(),
            seats: vehicle.seats,
            description: &vehicle.description,
        }
    }
}
