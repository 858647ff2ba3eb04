//! Middleware del sistema
//!
//! Autenticación del panel de admin y CORS.

pub mod auth;
pub mod cors;

pub use auth::{bearer_token, require_admin};
pub use cors::cors_layer;
