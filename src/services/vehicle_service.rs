//! Catálogo de vehículos
//!
//! Espejo del recurso `/cars` con las operaciones del panel de admin y los
//! filtros del catálogo público.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};
use validator::Validate;

use crate::clients::VehicleApi;
use crate::models::{Vehicle, VehicleFilter, VehicleInput};
use crate::services::remote_state::{RemoteCollection, RemoteSnapshot, RequestStatus};
use crate::utils::errors::{not_found_error, AppResult};

pub struct VehicleCatalogStore {
    api: Arc<dyn VehicleApi>,
    state: RwLock<RemoteCollection<Vehicle>>,
}

impl VehicleCatalogStore {
    pub fn new(api: Arc<dyn VehicleApi>) -> Self {
        Self {
            api,
            state: RwLock::new(RemoteCollection::new()),
        }
    }

    pub async fn snapshot(&self) -> RemoteSnapshot<Vehicle> {
        self.state.read().await.snapshot()
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let sequence = self.state.write().await.begin_list();
        let result = self.api.list_vehicles().await;

        let mut state = self.state.write().await;
        if !state.finish_list(sequence, &result) {
            info!("⏭️ Respuesta de vehículos obsoleta descartada (#{})", sequence);
            return Ok(state.items().to_vec());
        }

        match result {
            Ok(vehicles) => {
                info!("🚗 {} vehículos cargados", vehicles.len());
                Ok(vehicles)
            }
            Err(e) => {
                warn!("❌ Error cargando vehículos: {}", e);
                Err(e.into())
            }
        }
    }

    /// Cargar el catálogo sólo si todavía no se pidió
    pub async fn ensure_loaded(&self) -> AppResult<()> {
        if self.state.read().await.status() == RequestStatus::Idle {
            self.list().await?;
        }
        Ok(())
    }

    pub async fn add(&self, input: VehicleInput) -> AppResult<Vehicle> {
        let input = input.normalized();
        input.validate()?;

        self.state.write().await.begin_write();
        let result = self.api.create_vehicle(&input).await;

        let mut state = self.state.write().await;
        state.finish_write(&result);
        let created = result?;
        info!("✅ Vehículo {} creado: {}", created.id, created.display_name());
        state.push(created.clone());
        Ok(created)
    }

    pub async fn edit(&self, id: &str, input: VehicleInput) -> AppResult<Vehicle> {
        let input = input.normalized();
        input.validate()?;

        self.state.write().await.begin_write();
        let result = self.api.update_vehicle(id, &input).await;

        let mut state = self.state.write().await;
        state.finish_write(&result);
        let updated = result?;
        if !state.replace_where(|v| v.id == updated.id, updated.clone()) {
            warn!("⚠️ Vehículo {} editado pero no estaba en la copia local", updated.id);
        }
        info!("🔄 Vehículo {} actualizado", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.state.write().await.begin_write();
        let result = self.api.delete_vehicle(id).await;

        let mut state = self.state.write().await;
        state.finish_write(&result);
        result?;
        state.remove_where(|v| v.id == id);
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }

    pub async fn filter(&self, filter: &VehicleFilter) -> Vec<Vehicle> {
        self.state
            .read()
            .await
            .items()
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect()
    }

    pub async fn find(&self, id: &str) -> Option<Vehicle> {
        self.state.read().await.find(|v| v.id == id).cloned()
    }

    /// Como `find`, cargando el catálogo si hace falta
    pub async fn get(&self, id: &str) -> AppResult<Vehicle> {
        self.ensure_loaded().await?;
        self.find(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", id))
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeVehicleApi;
    use super::*;
    use crate::models::vehicle::sample_vehicle;
    use crate::models::{FuelType, Transmission};
    use crate::utils::errors::AppError;
    use rust_decimal::Decimal;

    fn input(brand: &str) -> VehicleInput {
        VehicleInput {
            brand: format!(" {} ", brand),
            model: "Clio".to_string(),
            year: 2023,
            color: "Red".to_string(),
            price_per_day: Decimal::from(90),
            seats: 5,
            category: "Compact".to_string(),
            transmission: Transmission::Manual,
            fuel: FuelType::Petrol,
            consumption: Decimal::new(52, 1),
            equipments: vec!["GPS".to_string()],
            description: "City car".to_string(),
            image: "https://img.test/clio.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ensure_loaded_lists_once() {
        let api = Arc::new(FakeVehicleApi::with(vec![sample_vehicle("1", "Audi", 200)]));
        let store = VehicleCatalogStore::new(api.clone());

        store.ensure_loaded().await.unwrap();
        store.ensure_loaded().await.unwrap();

        assert_eq!(*api.list_calls.lock().unwrap(), 1);
        assert_eq!(store.snapshot().await.status, RequestStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_admin_crud() {
        let api = Arc::new(FakeVehicleApi::with(vec![sample_vehicle("1", "Audi", 200)]));
        let store = VehicleCatalogStore::new(api);
        store.list().await.unwrap();

        let created = store.add(input("Renault")).await.unwrap();
        assert_eq!(created.brand, "Renault");
        assert_eq!(store.snapshot().await.items.len(), 2);

        let mut change = input("Renault");
        change.price_per_day = Decimal::new(9550, 2);
        let edited = store.edit(&created.id, change).await.unwrap();
        assert_eq!(edited.price_per_day, Decimal::new(9550, 2));
        assert_eq!(store.find(&created.id).await.unwrap().price_per_day, Decimal::new(9550, 2));

        store.delete("1").await.unwrap();
        let remaining = store.snapshot().await.items;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, created.id);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_backend() {
        let api = Arc::new(FakeVehicleApi::default());
        let store = VehicleCatalogStore::new(api.clone());

        let mut bad = input("Renault");
        bad.seats = 0;
        let result = store.add(bad).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(api.vehicles.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_unknown_passes_server_message() {
        let store = VehicleCatalogStore::new(Arc::new(FakeVehicleApi::default()));
        let error = store.edit("42", input("Renault")).await.unwrap_err();
        match error {
            AppError::ExternalApi(e) => assert_eq!(e.user_message(), "Car not found"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.snapshot().await.error.as_deref(), Some("Car not found"));
    }

    #[tokio::test]
    async fn test_filter_and_get() {
        let mut suv = sample_vehicle("2", "BMW", 300);
        suv.category = "SUV".to_string();
        let store = VehicleCatalogStore::new(Arc::new(FakeVehicleApi::with(vec![
            sample_vehicle("1", "Audi", 200),
            suv,
        ])));

        let found = store.get("2").await.unwrap();
        assert_eq!(found.brand, "BMW");
        assert!(matches!(store.get("9").await, Err(AppError::NotFound(_))));

        let filter = VehicleFilter {
            category: Some("SUV".to_string()),
            ..Default::default()
        };
        let suvs = store.filter(&filter).await;
        assert_eq!(suvs.len(), 1);
        assert_eq!(suvs[0].id, "2");
    }
}
