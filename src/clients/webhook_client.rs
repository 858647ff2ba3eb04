//! Webhooks de notificación (reservas confirmadas y formulario de contacto)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::models::{ContactMessage, Reservation};

use super::ClientError;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn reservation_confirmed(&self, reservation: &Reservation) -> Result<(), ClientError>;
    async fn contact_message(&self, message: &ContactMessage) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    reservation_url: Option<String>,
    contact_url: Option<String>,
}

impl WebhookClient {
    pub fn new(
        reservation_url: Option<String>,
        contact_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            reservation_url,
            contact_url,
        })
    }

    async fn post<T: Serialize + Sync>(&self, url: &str, payload: &T) -> Result<(), ClientError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        debug!("📨 Webhook entregado: {}", url);
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookClient {
    async fn reservation_confirmed(&self, reservation: &Reservation) -> Result<(), ClientError> {
        let url = self
            .reservation_url
            .as_deref()
            .ok_or(ClientError::NotConfigured("RESERVATION_WEBHOOK_URL"))?;
        self.post(url, reservation).await
    }

    async fn contact_message(&self, message: &ContactMessage) -> Result<(), ClientError> {
        let url = self
            .contact_url
            .as_deref()
            .ok_or(ClientError::NotConfigured("CONTACT_WEBHOOK_URL"))?;
        self.post(url, message).await
    }
}
