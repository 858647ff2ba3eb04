//! Cliente HTTP del backend REST
//!
//! Recursos `/cars` y `/Reservation`. Todas las peticiones llevan el timeout
//! configurado; un error del servidor conserva su mensaje.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Reservation, Vehicle, VehicleInput};

use super::ClientError;

/// Operaciones remotas sobre el catálogo de vehículos
#[async_trait]
pub trait VehicleApi: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError>;
    async fn create_vehicle(&self, input: &VehicleInput) -> Result<Vehicle, ClientError>;
    async fn update_vehicle(&self, id: &str, input: &VehicleInput) -> Result<Vehicle, ClientError>;
    async fn delete_vehicle(&self, id: &str) -> Result<(), ClientError>;
}

/// Operaciones remotas sobre la colección de reservas
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, ClientError>;
    async fn create_reservation(&self, reservation: &Reservation) -> Result<Reservation, ClientError>;
    async fn update_reservation(
        &self,
        id: &str,
        reservation: &Reservation,
    ) -> Result<Reservation, ClientError>;
    async fn delete_reservation(&self, id: &str) -> Result<(), ClientError>;
}

/// Cliente del backend REST
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn item_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, resource, urlencoding::encode(id))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl VehicleApi for BackendClient {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        debug!("🚗 GET /cars");
        self.send_json(self.client.get(self.collection_url("cars"))).await
    }

    async fn create_vehicle(&self, input: &VehicleInput) -> Result<Vehicle, ClientError> {
        debug!("🚗 POST /cars ({} {})", input.brand, input.model);
        self.send_json(self.client.post(self.collection_url("cars")).json(input))
            .await
    }

    async fn update_vehicle(&self, id: &str, input: &VehicleInput) -> Result<Vehicle, ClientError> {
        debug!("🚗 PUT /cars/{}", id);
        self.send_json(self.client.put(self.item_url("cars", id)).json(input))
            .await
    }

    async fn delete_vehicle(&self, id: &str) -> Result<(), ClientError> {
        debug!("🚗 DELETE /cars/{}", id);
        self.send_empty(self.client.delete(self.item_url("cars", id))).await
    }
}

#[async_trait]
impl ReservationApi for BackendClient {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        debug!("📋 GET /Reservation");
        self.send_json(self.client.get(self.collection_url("Reservation")))
            .await
    }

    async fn create_reservation(&self, reservation: &Reservation) -> Result<Reservation, ClientError> {
        debug!("📋 POST /Reservation (car {})", reservation.car_id);
        self.send_json(
            self.client
                .post(self.collection_url("Reservation"))
                .json(reservation),
        )
        .await
    }

    async fn update_reservation(
        &self,
        id: &str,
        reservation: &Reservation,
    ) -> Result<Reservation, ClientError> {
        debug!("📋 PUT /Reservation/{} ({})", id, reservation.status);
        self.send_json(
            self.client
                .put(self.item_url("Reservation", id))
                .json(reservation),
        )
        .await
    }

    async fn delete_reservation(&self, id: &str) -> Result<(), ClientError> {
        debug!("📋 DELETE /Reservation/{}", id);
        self.send_empty(self.client.delete(self.item_url("Reservation", id)))
            .await
    }
}
