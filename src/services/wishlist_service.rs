//! Wishlist
//!
//! Lista de vehículos favoritos en orden de inserción, única por id. Cada
//! mutación reescribe la lista completa en el almacenamiento persistente bajo
//! la clave `wishlistCars`. Un fallo al persistir se registra y se devuelve
//! en el snapshot, nunca como error.

use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{load_json, save_json, SharedStore, StorageError, WISHLIST_KEY};
use crate::models::Vehicle;

/// Estado visible de la wishlist
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistSnapshot {
    pub items: Vec<Vehicle>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
}

pub struct WishlistStore {
    store: SharedStore,
    items: RwLock<Vec<Vehicle>>,
}

impl WishlistStore {
    /// Cargar la wishlist guardada.
    ///
    /// Ids duplicados se descartan conservando la primera aparición; datos
    /// ilegibles dan una wishlist vacía.
    pub async fn init(store: SharedStore) -> Self {
        let items = match load_json::<Vec<Vehicle>>(store.as_ref(), WISHLIST_KEY).await {
            Ok(Some(saved)) => dedupe(saved),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("⚠️ Wishlist guardada ilegible, se empieza vacía: {}", e);
                Vec::new()
            }
        };

        info!("❤️ Wishlist cargada con {} vehículos", items.len());
        Self {
            store,
            items: RwLock::new(items),
        }
    }

    pub async fn snapshot(&self) -> WishlistSnapshot {
        let items = self.items.read().await;
        snapshot_of(&items, None)
    }

    pub async fn contains(&self, vehicle_id: &str) -> bool {
        self.items.read().await.iter().any(|v| v.id == vehicle_id)
    }

    /// Añadir un vehículo; no hace nada si ya hay uno con el mismo id
    pub async fn add(&self, vehicle: Vehicle) -> WishlistSnapshot {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == vehicle.id) {
            debug!("❤️ Vehículo {} ya está en la wishlist", vehicle.id);
            return snapshot_of(&items, None);
        }

        debug!("❤️ Añadiendo vehículo {} a la wishlist", vehicle.id);
        items.push(vehicle);
        let persist_error = self.persist(&items).await.err();
        snapshot_of(&items, persist_error)
    }

    /// Quitar un vehículo por id (idempotente)
    pub async fn remove(&self, vehicle_id: &str) -> WishlistSnapshot {
        let mut items = self.items.write().await;
        items.retain(|vehicle| vehicle.id != vehicle_id);
        let persist_error = self.persist(&items).await.err();
        snapshot_of(&items, persist_error)
    }

    /// Vaciar la wishlist y borrar la clave persistida
    pub async fn clear(&self) -> WishlistSnapshot {
        let mut items = self.items.write().await;
        items.clear();
        let persist_error = match self.store.remove(WISHLIST_KEY).await {
            Ok(()) => None,
            Err(e) => Some(persist_failed(e)),
        };
        snapshot_of(&items, persist_error)
    }

    async fn persist(&self, items: &[Vehicle]) -> Result<(), String> {
        save_json(self.store.as_ref(), WISHLIST_KEY, items)
            .await
            .map_err(persist_failed)
    }
}

fn persist_failed(error: StorageError) -> String {
    warn!("⚠️ No se pudo guardar la wishlist: {}", error);
    error.to_string()
}

fn snapshot_of(items: &[Vehicle], persist_error: Option<String>) -> WishlistSnapshot {
    WishlistSnapshot {
        items: items.to_vec(),
        total: items.len(),
        persist_error,
    }
}

fn dedupe(items: Vec<Vehicle>) -> Vec<Vehicle> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|vehicle| seen.insert(vehicle.id.clone()))
        .collect()
}
