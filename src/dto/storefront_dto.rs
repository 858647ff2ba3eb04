use serde::{Deserialize, Serialize};

use crate::models::{ReservationForm, Vehicle, VehicleFilter};
use crate::services::RequestStatus;

/// Query del catálogo público
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub transmission: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

impl CatalogQuery {
    pub fn filter(&self) -> VehicleFilter {
        VehicleFilter {
            category: self.category.clone(),
            transmission: self.transmission.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub cars: Vec<Vehicle>,
    pub total: usize,
    pub status: RequestStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub filters_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    #[serde(deserialize_with = "crate::utils::ids::string_or_number")]
    pub vehicle_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(deserialize_with = "crate::utils::ids::string_or_number")]
    pub car_id: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Formulario de reserva junto al vehículo elegido
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(deserialize_with = "crate::utils::ids::string_or_number")]
    pub car_id: String,
    #[serde(flatten)]
    pub form: ReservationForm,
}

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub url: String,
}
