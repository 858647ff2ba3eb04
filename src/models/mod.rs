//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a los recursos del backend REST y a los formularios de la UI.

pub mod auth;
pub mod contact;
pub mod recommendation;
pub mod reservation;
pub mod vehicle;

pub use reservation::{
    ParsedReservationForm, Reservation, ReservationDraft, ReservationForm, ReservationStats,
    ReservationStatus,
};
pub use vehicle::{FuelType, Transmission, Vehicle, VehicleFilter, VehicleInput};
pub use auth::{JwtClaims, LoginRequest, LoginResponse, UserInfo, UserRole};
pub use contact::ContactMessage;
pub use recommendation::{RecommendationCandidate, UserPreferences};
