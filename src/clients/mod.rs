//! Clients - HTTP clients for external APIs
//!
//! Backend REST (`/cars`, `/Reservation`), modelo generativo, host de
//! imágenes y webhooks de notificación. Cada cliente implementa un trait
//! para poder sustituirlo por un fake en los tests.

pub mod backend_client;
pub mod client_error;
pub mod gemini_client;
pub mod media_client;
pub mod webhook_client;

pub use backend_client::{BackendClient, ReservationApi, VehicleApi};
pub use client_error::ClientError;
pub use gemini_client::{GeminiClient, GenerativeModel};
pub use media_client::{MediaClient, MediaUploader, UploadedFile};
pub use webhook_client::{Notifier, WebhookClient};
