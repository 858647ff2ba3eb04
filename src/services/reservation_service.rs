//! Reservas remotas
//!
//! Proxy CRUD de la colección `/Reservation` del backend con su estado de
//! petición. Las transiciones de estado se validan antes de cualquier
//! llamada de red.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::clients::ReservationApi;
use crate::models::{Reservation, ReservationStats, ReservationStatus};
use crate::services::pricing_service::rental_duration;
use crate::services::remote_state::{RemoteCollection, RemoteSnapshot, RequestStatus};
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

fn transition_conflict(id: &str, from: ReservationStatus, to: ReservationStatus) -> AppError {
    AppError::Conflict(format!("Reservation '{}' cannot go from {} to {}", id, from, to))
}

/// Reglas de un reemplazo completo frente a la copia local.
///
/// El precio por día implícito (total / duración) no puede cambiar.
fn check_replacement(id: &str, current: &Reservation, next: &Reservation) -> AppResult<()> {
    if next.status != current.status && !current.status.can_transition_to(next.status) {
        return Err(transition_conflict(id, current.status, next.status));
    }

    if next.duration <= 0 || rental_duration(&next.start_date, &next.end_date) != next.duration {
        return Err(validation_error("duration", "Duration does not match the selected dates"));
    }

    let scaled_next = next.total_price.checked_mul(current.duration.into());
    let scaled_current = current.total_price.checked_mul(next.duration.into());
    match (scaled_next, scaled_current) {
        (Some(a), Some(b)) if a == b && next.total_price > Decimal::ZERO => Ok(()),
        _ => Err(validation_error("totalPrice", "Total price does not match the daily rate")),
    }
}

pub struct ReservationRemoteStore {
    api: Arc<dyn ReservationApi>,
    state: RwLock<RemoteCollection<Reservation>>,
}

impl ReservationRemoteStore {
    pub fn new(api: Arc<dyn ReservationApi>) -> Self {
        Self {
            api,
            state: RwLock::new(RemoteCollection::new()),
        }
    }

    pub async fn snapshot(&self) -> RemoteSnapshot<Reservation> {
        self.state.read().await.snapshot()
    }

    pub async fn status(&self) -> RequestStatus {
        self.state.read().await.status()
    }

    /// Cargar la colección completa y reemplazar la copia local.
    ///
    /// Si mientras tanto se lanzó otro `list()`, esta respuesta se descarta
    /// y se devuelve el estado vigente.
    pub async fn list(&self) -> AppResult<Vec<Reservation>> {
        let sequence = self.state.write().await.begin_list();
        let result = self.api.list_reservations().await;

        let mut state = self.state.write().await;
        if !state.finish_list(sequence, &result) {
            info!("⏭️ Respuesta de reservas obsoleta descartada (#{})", sequence);
            return Ok(state.items().to_vec());
        }

        match result {
            Ok(reservations) => {
                info!("📋 {} reservas cargadas", reservations.len());
                Ok(reservations)
            }
            Err(e) => {
                warn!("❌ Error cargando reservas: {}", e);
                Err(e.into())
            }
        }
    }

    /// Cargar sólo si todavía no se intentó
    pub async fn ensure_loaded(&self) -> AppResult<()> {
        if self.status().await == RequestStatus::Idle {
            self.list().await?;
        }
        Ok(())
    }

    /// Crear una reserva; el servidor asigna el id definitivo
    pub async fn create(&self, mut reservation: Reservation) -> AppResult<Reservation> {
        reservation.id.clear();

        self.state.write().await.begin_write();
        let result = self.api.create_reservation(&reservation).await;

        let mut state = self.state.write().await;
        state.finish_write(&result);
        let created = result?;
        info!("✅ Reserva {} creada para {}", created.id, created.car_name);
        state.push(created.clone());
        Ok(created)
    }

    /// Cambiar el estado de una reserva conocida (PUT del objeto completo)
    pub async fn update_status(&self, id: &str, status: ReservationStatus) -> AppResult<Reservation> {
        let current = self
            .state
            .read()
            .await
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if !current.status.can_transition_to(status) {
            return Err(transition_conflict(id, current.status, status));
        }

        self.send_update(id, current.with_status(status)).await
    }

    /// Reemplazo completo desde el panel de admin
    pub async fn update(&self, id: &str, mut reservation: Reservation) -> AppResult<Reservation> {
        reservation.id = id.to_string();

        let current = self
            .state
            .read()
            .await
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Reservation", id))?;
        check_replacement(id, &current, &reservation)?;

        self.send_update(id, reservation).await
    }

    async fn send_update(&self, id: &str, reservation: Reservation) -> AppResult<Reservation> {
        self.state.write().await.begin_write();
        let result = self.api.update_reservation(id, &reservation).await;

        let mut state = self.state.write().await;
        state.finish_write(&result);
        let mut updated = result?;
        if updated.id.is_empty() {
            updated.id = id.to_string();
        }
        if !state.replace_where(|r| r.id == id, updated.clone()) {
            warn!("⚠️ Reserva {} actualizada pero no estaba en la copia local", id);
        }
        info!("🔄 Reserva {} ahora está {}", id, updated.status);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.state.write().await.begin_write();
        let result = self.api.delete_reservation(id).await;

        let mut state = self.state.write().await;
        state.finish_write(&result);
        result?;
        state.remove_where(|r| r.id == id);
        info!("🗑️ Reserva {} eliminada", id);
        Ok(())
    }

    /// Listado del panel de admin: búsqueda y contadores sobre el resultado filtrado
    pub async fn search(&self, term: &str) -> (Vec<Reservation>, ReservationStats) {
        let state = self.state.read().await;
        let filtered: Vec<Reservation> = state
            .items()
            .iter()
            .filter(|r| r.matches_search(term))
            .cloned()
            .collect();
        let stats = ReservationStats::from_reservations(&filtered);
        (filtered, stats)
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeReservationApi;
    use super::*;
    use crate::clients::ClientError;
    use crate::models::reservation::sample_reservation;

    fn store_with(api: Arc<FakeReservationApi>) -> ReservationRemoteStore {
        ReservationRemoteStore::new(api)
    }

    #[tokio::test]
    async fn test_update_status_replaces_local_entry() {
        let api = Arc::new(FakeReservationApi::with_list(vec![
            sample_reservation("4", ReservationStatus::Pending),
            sample_reservation("5", ReservationStatus::Pending),
        ]));
        let store = store_with(api.clone());
        store.list().await.unwrap();

        let updated = store.update_status("5", ReservationStatus::Confirmed).await.unwrap();

        assert_eq!(updated.status, ReservationStatus::Confirmed);
        assert_eq!(api.calls().last().map(String::as_str), Some("PUT 5 confirmed"));
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.items[0].status, ReservationStatus::Pending);
        assert_eq!(snapshot.items[1].status, ReservationStatus::Confirmed);
        assert_eq!(snapshot.items[1].customer_name, "John Doe");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_failed_list_leaves_reservations_unchanged() {
        let api = Arc::new(FakeReservationApi::with_list(vec![sample_reservation(
            "1",
            ReservationStatus::Confirmed,
        )]));
        api.push_list(Err(ClientError::Transport("Network Error".to_string())));
        let store = store_with(api);

        store.list().await.unwrap();
        let result = store.list().await;

        assert!(matches!(result, Err(AppError::ExternalApi(_))));
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.status, RequestStatus::Failed);
        assert_eq!(snapshot.error.as_deref(), Some("Network Error"));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_stale_list_response_is_discarded() {
        let api = Arc::new(FakeReservationApi::default());
        let slow = api.push_gated();
        api.push_list(Ok(vec![sample_reservation("new", ReservationStatus::Pending)]));
        let store = Arc::new(store_with(api));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.list().await }
        });
        while !store.snapshot().await.loading {
            tokio::task::yield_now().await;
        }

        store.list().await.unwrap();
        slow.send(Ok(vec![sample_reservation("old", ReservationStatus::Pending)]))
            .unwrap();
        let first_result = first.await.unwrap().unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, "new");
        assert_eq!(first_result[0].id, "new");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_disallowed_transition_makes_no_call() {
        let api = Arc::new(FakeReservationApi::with_list(vec![
            sample_reservation("1", ReservationStatus::Confirmed),
            sample_reservation("2", ReservationStatus::Pending),
        ]));
        let store = store_with(api.clone());
        store.list().await.unwrap();

        let back_to_pending = store.update_status("1", ReservationStatus::Pending).await;
        let same = store.update_status("2", ReservationStatus::Pending).await;
        let unknown = store.update_status("9", ReservationStatus::Confirmed).await;

        assert!(matches!(back_to_pending, Err(AppError::Conflict(_))));
        assert!(matches!(same, Err(AppError::Conflict(_))));
        assert!(matches!(unknown, Err(AppError::NotFound(_))));
        assert_eq!(api.calls(), vec!["GET"]);
    }

    #[tokio::test]
    async fn test_full_replace_updates_contact_and_dates() {
        let api = Arc::new(FakeReservationApi::with_list(vec![sample_reservation(
            "1",
            ReservationStatus::Pending,
        )]));
        let store = store_with(api.clone());
        store.list().await.unwrap();

        let mut next = sample_reservation("ignored", ReservationStatus::Confirmed);
        next.customer_phone = "+212600000000".to_string();
        next.end_date = "2025-01-06".to_string();
        next.duration = 5;
        next.total_price = Decimal::from(1000);

        let updated = store.update("1", next).await.unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.duration, 5);
        assert_eq!(api.calls().last().map(String::as_str), Some("PUT 1 confirmed"));
        assert_eq!(store.snapshot().await.items[0].customer_phone, "+212600000000");
    }

    #[tokio::test]
    async fn test_full_replace_rejects_disallowed_status() {
        let api = Arc::new(FakeReservationApi::with_list(vec![sample_reservation(
            "1",
            ReservationStatus::Confirmed,
        )]));
        let store = store_with(api.clone());
        store.list().await.unwrap();

        let result = store
            .update("1", sample_reservation("1", ReservationStatus::Pending))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(api.calls(), vec!["GET"]);
        assert_eq!(store.snapshot().await.items[0].status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_full_replace_rejects_inconsistent_duration() {
        let api = Arc::new(FakeReservationApi::with_list(vec![sample_reservation(
            "1",
            ReservationStatus::Confirmed,
        )]));
        let store = store_with(api.clone());
        store.list().await.unwrap();

        let mut negative = sample_reservation("1", ReservationStatus::Confirmed);
        negative.duration = -4;
        let mut mismatched = sample_reservation("1", ReservationStatus::Confirmed);
        mismatched.duration = 10;
        let mut reversed = sample_reservation("1", ReservationStatus::Confirmed);
        reversed.start_date = "2025-01-04".to_string();
        reversed.end_date = "2025-01-01".to_string();
        reversed.duration = 0;

        for payload in [negative, mismatched, reversed] {
            let result = store.update("1", payload).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
        assert_eq!(api.calls(), vec!["GET"]);
        assert_eq!(store.snapshot().await.items[0].duration, 3);
    }

    #[tokio::test]
    async fn test_full_replace_rejects_total_off_the_daily_rate() {
        let api = Arc::new(FakeReservationApi::with_list(vec![sample_reservation(
            "1",
            ReservationStatus::Pending,
        )]));
        let store = store_with(api.clone());
        store.list().await.unwrap();

        let mut cheaper = sample_reservation("1", ReservationStatus::Pending);
        cheaper.total_price = Decimal::from(1);
        let mut free = sample_reservation("1", ReservationStatus::Pending);
        free.total_price = Decimal::ZERO;

        assert!(matches!(store.update("1", cheaper).await, Err(AppError::Validation(_))));
        assert!(matches!(store.update("1", free).await, Err(AppError::Validation(_))));
        assert!(matches!(
            store.update("9", sample_reservation("9", ReservationStatus::Pending)).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(api.calls(), vec!["GET"]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_local_state() {
        let api = Arc::new(FakeReservationApi::with_list(vec![sample_reservation(
            "1",
            ReservationStatus::Pending,
        )]));
        let store = store_with(api.clone());
        store.list().await.unwrap();
        *api.fail_writes.lock().unwrap() = Some(ClientError::Server {
            status: 400,
            message: "Car already booked".to_string(),
        });

        assert!(store.update_status("1", ReservationStatus::Confirmed).await.is_err());
        assert!(store.delete("1").await.is_err());
        assert!(store
            .create(sample_reservation("tmp", ReservationStatus::Pending))
            .await
            .is_err());

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].status, ReservationStatus::Pending);
        assert_eq!(snapshot.error.as_deref(), Some("Car already booked"));
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let api = Arc::new(FakeReservationApi::default());
        let store = store_with(api.clone());

        let created = store
            .create(sample_reservation("1700000000000", ReservationStatus::Pending))
            .await
            .unwrap();
        assert_eq!(created.id, "srv-1");
        assert_eq!(store.snapshot().await.items.len(), 1);

        store.delete("srv-1").await.unwrap();
        assert!(store.snapshot().await.items.is_empty());
        assert_eq!(api.calls(), vec!["POST 7", "DELETE srv-1"]);
    }

    #[tokio::test]
    async fn test_search_and_stats() {
        let mut other = sample_reservation("3", ReservationStatus::Cancelled);
        other.customer_name = "Jane Roe".to_string();
        other.car_name = "BMW X5".to_string();
        let api = Arc::new(FakeReservationApi::with_list(vec![
            sample_reservation("1", ReservationStatus::Confirmed),
            sample_reservation("2", ReservationStatus::Pending),
            other,
        ]));
        let store = store_with(api);
        store.ensure_loaded().await.unwrap();

        let (all, stats) = store.search("").await;
        assert_eq!(all.len(), 3);
        assert_eq!((stats.confirmed, stats.pending, stats.cancelled), (1, 1, 1));

        let (bmw, stats) = store.search("bmw").await;
        assert_eq!(bmw.len(), 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.total, 1);
    }
}
