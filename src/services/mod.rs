//! Services module
//!
//! Este módulo contiene la lógica de negocio: los contenedores de estado
//! (wishlist, borrador, colecciones remotas) y los flujos que los combinan
//! con los clientes externos.

pub mod auth_service;
pub mod booking_service;
pub mod contact_service;
pub mod jwt_service;
pub mod legacy_reservation_cache;
pub mod media_service;
pub mod pricing_service;
pub mod recommendation_service;
pub mod remote_state;
pub mod reservation_draft_service;
pub mod reservation_service;
pub mod vehicle_service;
pub mod wishlist_service;

pub use auth_service::AuthService;
pub use booking_service::BookingService;
pub use jwt_service::JwtService;
pub use legacy_reservation_cache::LegacyReservationCache;
pub use pricing_service::{rental_duration, total_price, BookingQuote};
pub use recommendation_service::{RecommendationService, RecommendationState};
pub use remote_state::{RemoteSnapshot, RequestStatus};
pub use reservation_draft_service::ReservationDraftHolder;
pub use reservation_service::ReservationRemoteStore;
pub use vehicle_service::VehicleCatalogStore;
pub use wishlist_service::{WishlistSnapshot, WishlistStore};
