//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como lo expone el backend REST
//! (`/cars`) y sus variantes para las operaciones CRUD del panel de admin.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::ids::string_or_number;
use crate::utils::validation::validate_positive_decimal;

/// Tipo de caja de cambios
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tipo de combustible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::Electric => "Electric",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente al recurso `/cars` del backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_day: Decimal,
    pub seats: u32,
    pub category: String,
    pub transmission: Transmission,
    pub fuel: FuelType,
    #[serde(with = "rust_decimal::serde::float")]
    pub consumption: Decimal,
    #[serde(default)]
    pub equipments: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Vehicle {
    /// Nombre comercial mostrado en reservas ("Audi A3")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Payload para crear o reemplazar un vehículo desde el panel de admin
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100, message = "Year is required"))]
    pub year: i32,

    #[validate(length(min = 1, message = "Color is required"))]
    pub color: String,

    #[validate(custom = "validate_positive_decimal")]
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_day: Decimal,

    #[validate(range(min = 1, max = 60, message = "Seats are required"))]
    pub seats: u32,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub transmission: Transmission,

    pub fuel: FuelType,

    #[validate(custom = "validate_positive_decimal")]
    #[serde(with = "rust_decimal::serde::float")]
    pub consumption: Decimal,

    #[validate(length(min = 1, message = "Equipments are required"))]
    #[serde(deserialize_with = "equipments::deserialize")]
    pub equipments: Vec<String>,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
}

impl VehicleInput {
    /// Normalizar espacios antes de validar
    pub fn normalized(mut self) -> Self {
        self.brand = self.brand.trim().to_string();
        self.model = self.model.trim().to_string();
        self.color = self.color.trim().to_string();
        self.category = self.category.trim().to_string();
        self.description = self.description.trim().to_string();
        self.image = self.image.trim().to_string();
        self
    }
}

/// Separar una lista de equipamientos escrita como "GPS, Bluetooth, ..."
pub fn parse_equipments(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

mod equipments {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawEquipments {
        List(Vec<String>),
        Text(String),
    }

    /// Acepta una lista JSON o un texto separado por comas
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawEquipments::deserialize(deserializer)? {
            RawEquipments::List(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            RawEquipments::Text(text) => super::parse_equipments(&text),
        })
    }
}

/// Filtros del catálogo público
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    pub category: Option<String>,
    pub transmission: Option<String>,
    pub search: Option<String>,
}

impl VehicleFilter {
    /// "All" o vacío equivale a no filtrar
    fn active(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let category_ok = Self::active(&self.category).map_or(true, |c| vehicle.category == c);
        let transmission_ok =
            Self::active(&self.transmission).map_or(true, |t| vehicle.transmission.as_str() == t);
        let search_ok = self
            .search
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
            .map_or(true, |q| {
                vehicle.brand.to_lowercase().contains(&q) || vehicle.model.to_lowercase().contains(&q)
            });

        category_ok && transmission_ok && search_ok
    }

    /// Indica si hay algún filtro aplicado (para el botón "Reset")
    pub fn is_active(&self) -> bool {
        Self::active(&self.category).is_some()
            || Self::active(&self.transmission).is_some()
            || self.search.as_deref().map_or(false, |q| !q.trim().is_empty())
    }
}

#[cfg(test)]
pub(crate) fn sample_vehicle(id: &str, brand: &str, price_per_day: i64) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        brand: brand.to_string(),
        model: "A3".to_string(),
        year: 2024,
        color: "White".to_string(),
        price_per_day: Decimal::from(price_per_day),
        seats: 5,
        category: "Sedan".to_string(),
        transmission: Transmission::Automatic,
        fuel: FuelType::Petrol,
        consumption: Decimal::new(65, 1),
        equipments: vec!["GPS".to_string(), "Bluetooth".to_string()],
        description: "Compact premium sedan".to_string(),
        image: format!("https://img.test/{}.jpg", id),
    }
}
