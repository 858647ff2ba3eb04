//! Rutas HTTP
//!
//! Superficie JSON del storefront y del panel de admin.

pub mod admin_routes;
pub mod auth_routes;
pub mod contact_routes;
pub mod health_routes;
pub mod recommendation_routes;
pub mod reservation_routes;
pub mod vehicle_routes;
pub mod wishlist_routes;

use axum::Router;

use crate::state::AppState;

/// Router completo de la API (sin capas transversales)
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api/cars", vehicle_routes::create_vehicle_router())
        .nest("/api/wishlist", wishlist_routes::create_wishlist_router())
        .nest("/api/reservations", reservation_routes::create_reservation_router())
        .nest("/api/recommendations", recommendation_routes::create_recommendation_router())
        .nest("/api/contact", contact_routes::create_contact_router())
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/admin", admin_routes::create_admin_router(state))
}
