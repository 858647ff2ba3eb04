//! DTOs de la API HTTP

pub mod admin_dto;
pub mod api_response;
pub mod storefront_dto;

pub use admin_dto::*;
pub use api_response::ApiResponse;
pub use storefront_dto::*;
