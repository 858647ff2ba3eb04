//! Shared application state
//!
//! Contenedores de estado creados una sola vez al arrancar y compartidos por
//! el router de Axum.

use std::sync::Arc;

use tracing::info;

use crate::cache::{open_store, SharedStore};
use crate::clients::{
    BackendClient, GeminiClient, GenerativeModel, MediaClient, MediaUploader, Notifier,
    ReservationApi, VehicleApi, WebhookClient,
};
use crate::config::EnvironmentConfig;
use crate::services::{
    AuthService, BookingService, LegacyReservationCache, RecommendationService,
    ReservationDraftHolder, ReservationRemoteStore, VehicleCatalogStore, WishlistStore,
};
use crate::utils::errors::AppResult;

/// Colaboradores externos del estado
#[derive(Clone)]
pub struct Collaborators {
    pub vehicle_api: Arc<dyn VehicleApi>,
    pub reservation_api: Arc<dyn ReservationApi>,
    pub model: Arc<dyn GenerativeModel>,
    pub media: Arc<dyn MediaUploader>,
    pub notifier: Arc<dyn Notifier>,
}

impl Collaborators {
    /// Clientes HTTP reales según la configuración
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        let backend = Arc::new(BackendClient::new(
            config.api_base_url.clone(),
            config.request_timeout,
        )?);

        Ok(Self {
            vehicle_api: backend.clone(),
            reservation_api: backend,
            model: Arc::new(GeminiClient::new(
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
                config.gemini_api_key.clone(),
                config.request_timeout,
            )?),
            media: Arc::new(MediaClient::new(
                config.media_upload_url.clone(),
                config.media_upload_preset.clone(),
                config.request_timeout,
            )?),
            notifier: Arc::new(WebhookClient::new(
                config.reservation_webhook_url.clone(),
                config.contact_webhook_url.clone(),
                config.request_timeout,
            )?),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<VehicleCatalogStore>,
    pub wishlist: Arc<WishlistStore>,
    pub drafts: Arc<ReservationDraftHolder>,
    pub reservations: Arc<ReservationRemoteStore>,
    pub legacy_reservations: Arc<LegacyReservationCache>,
    pub booking: Arc<BookingService>,
    pub recommendations: Arc<RecommendationService>,
    pub auth: Arc<AuthService>,
    pub media: Arc<dyn MediaUploader>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Construir todo el estado desde la configuración
    pub async fn from_config(config: EnvironmentConfig) -> AppResult<Self> {
        let store = open_store(&config.storage).await?;
        let collaborators = Collaborators::from_config(&config)?;
        let auth = AuthService::from_config(&config)?;
        Ok(Self::build(config, store, collaborators, auth).await)
    }

    pub async fn build(
        config: EnvironmentConfig,
        store: SharedStore,
        collaborators: Collaborators,
        auth: AuthService,
    ) -> Self {
        let vehicles = Arc::new(VehicleCatalogStore::new(collaborators.vehicle_api));
        let reservations = Arc::new(ReservationRemoteStore::new(collaborators.reservation_api));
        let drafts = Arc::new(ReservationDraftHolder::new());
        let wishlist = Arc::new(WishlistStore::init(store.clone()).await);
        let legacy_reservations = Arc::new(LegacyReservationCache::load(store).await);

        let booking = Arc::new(BookingService::new(
            vehicles.clone(),
            reservations.clone(),
            drafts.clone(),
            legacy_reservations.clone(),
            collaborators.notifier.clone(),
        ));

        info!("🧩 Estado de la aplicación inicializado");

        Self {
            config: Arc::new(config),
            vehicles,
            wishlist,
            drafts,
            reservations,
            legacy_reservations,
            booking,
            recommendations: Arc::new(RecommendationService::new(collaborators.model)),
            auth: Arc::new(auth),
            media: collaborators.media,
            notifier: collaborators.notifier,
        }
    }
}
