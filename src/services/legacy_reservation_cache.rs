//! Caché local de reservas (clave `reservations`)
//!
//! Lista guardada en el almacenamiento persistente con las reservas
//! confirmadas desde esta instancia. Cada cambio reescribe la lista entera.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{load_json, save_json, SharedStore, StorageError, LEGACY_RESERVATIONS_KEY};
use crate::models::{Reservation, ReservationStatus};

pub struct LegacyReservationCache {
    store: SharedStore,
    items: RwLock<Vec<Reservation>>,
}

impl LegacyReservationCache {
    /// Cargar la lista guardada; datos ilegibles equivalen a una lista vacía
    pub async fn load(store: SharedStore) -> Self {
        let items = match load_json::<Vec<Reservation>>(store.as_ref(), LEGACY_RESERVATIONS_KEY).await {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                warn!("⚠️ Caché de reservas ilegible, se ignora: {}", e);
                Vec::new()
            }
        };

        Self {
            store,
            items: RwLock::new(items),
        }
    }

    pub async fn list(&self) -> Vec<Reservation> {
        self.items.read().await.clone()
    }

    pub async fn add(&self, reservation: Reservation) -> Result<(), StorageError> {
        let mut items = self.items.write().await;
        items.push(reservation);
        save_json(self.store.as_ref(), LEGACY_RESERVATIONS_KEY, items.as_slice()).await
    }

    /// Cambiar el estado de una reserva guardada; sin efecto si el id no existe
    pub async fn update_status(&self, id: &str, status: ReservationStatus) -> Result<bool, StorageError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                reservation.status = status;
                save_json(self.store.as_ref(), LEGACY_RESERVATIONS_KEY, items.as_slice()).await?;
                debug!("💾 Reserva local {} marcada como {}", id, status);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut items = self.items.write().await;
        items.clear();
        save_json(self.store.as_ref(), LEGACY_RESERVATIONS_KEY, items.as_slice()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::{KeyValueStore, MemoryStore};
    use crate::models::reservation::sample_reservation;

    #[tokio::test]
    async fn test_add_update_clear_persist() {
        let memory = Arc::new(MemoryStore::new());
        let cache = LegacyReservationCache::load(memory.clone()).await;

        cache
            .add(sample_reservation("1", ReservationStatus::Pending))
            .await
            .unwrap();
        assert!(cache.update_status("1", ReservationStatus::Cancelled).await.unwrap());
        assert!(!cache.update_status("2", ReservationStatus::Cancelled).await.unwrap());

        let reloaded = LegacyReservationCache::load(memory.clone()).await.list().await;
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].status, ReservationStatus::Cancelled);

        cache.clear().await.unwrap();
        assert_eq!(
            memory.get(LEGACY_RESERVATIONS_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_corrupt_data_loads_empty() {
        let memory = Arc::new(MemoryStore::new());
        memory.set(LEGACY_RESERVATIONS_KEY, "{{{").await.unwrap();

        let cache = LegacyReservationCache::load(memory).await;
        assert!(cache.list().await.is_empty());
    }
}
