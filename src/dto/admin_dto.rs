use serde::{Deserialize, Serialize};

use crate::models::{Reservation, ReservationStats, ReservationStatus};
use crate::services::RequestStatus;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationSearchQuery {
    pub search: Option<String>,
}

/// Listado del panel de reservas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReservationsResponse {
    pub reservations: Vec<Reservation>,
    pub stats: ReservationStats,
    pub status: RequestStatus,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ReservationStatus,
}
