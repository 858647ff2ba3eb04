//! Núcleo del storefront de alquiler de coches
//!
//! Lista de deseos persistente, borrador y confirmación de reservas, catálogo
//! y panel de admin sobre un backend REST remoto.

pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Aplicación completa con sus capas transversales
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    routes::create_api_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
