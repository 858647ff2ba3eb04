//! Flujo de reserva: presupuesto, paso al pago y confirmación

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::clients::{ClientError, Notifier};
use crate::models::{Reservation, ReservationForm, ReservationStatus};
use crate::services::legacy_reservation_cache::LegacyReservationCache;
use crate::services::pricing_service::{rental_duration, total_price, BookingQuote};
use crate::services::reservation_draft_service::ReservationDraftHolder;
use crate::services::reservation_service::ReservationRemoteStore;
use crate::services::vehicle_service::VehicleCatalogStore;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::ids::temporary_id;
use crate::utils::validation::DATE_FORMAT;

pub struct BookingService {
    vehicles: Arc<VehicleCatalogStore>,
    reservations: Arc<ReservationRemoteStore>,
    drafts: Arc<ReservationDraftHolder>,
    legacy: Arc<LegacyReservationCache>,
    notifier: Arc<dyn Notifier>,
}

impl BookingService {
    pub fn new(
        vehicles: Arc<VehicleCatalogStore>,
        reservations: Arc<ReservationRemoteStore>,
        drafts: Arc<ReservationDraftHolder>,
        legacy: Arc<LegacyReservationCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            vehicles,
            reservations,
            drafts,
            legacy,
            notifier,
        }
    }

    pub async fn quote(&self, car_id: &str, start_date: &str, end_date: &str) -> AppResult<BookingQuote> {
        let vehicle = self.vehicles.get(car_id).await?;
        BookingQuote::for_vehicle(&vehicle, start_date, end_date)
    }

    /// "Continue to payment": reserva `pending` con id temporal, sin tocar el backend
    pub async fn checkout(
        &self,
        car_id: &str,
        form: &ReservationForm,
        today: NaiveDate,
    ) -> AppResult<Reservation> {
        let vehicle = self.vehicles.get(car_id).await?;
        let parsed = form.parse(today)?;

        let reservation = Reservation {
            id: temporary_id(),
            car_id: vehicle.id.clone(),
            car_name: vehicle.display_name(),
            car_image: vehicle.image.clone(),
            customer_name: parsed.name,
            customer_email: parsed.email,
            customer_phone: parsed.phone,
            start_date: parsed.start_date.format(DATE_FORMAT).to_string(),
            end_date: parsed.end_date.format(DATE_FORMAT).to_string(),
            duration: parsed.duration,
            total_price: total_price(parsed.duration, vehicle.price_per_day)?,
            status: ReservationStatus::Pending,
        };

        self.drafts.clear_draft().await;
        info!(
            "🧾 Reserva {} preparada: {} durante {} días ({})",
            reservation.id, reservation.car_name, reservation.duration, reservation.total_price
        );
        Ok(reservation)
    }

    /// Confirmar: crear en el backend, guardar en la caché local y notificar
    pub async fn confirm(&self, reservation: Reservation) -> AppResult<Reservation> {
        let form = ReservationForm {
            name: reservation.customer_name.clone(),
            email: reservation.customer_email.clone(),
            phone: reservation.customer_phone.clone(),
            start_date: reservation.start_date.clone(),
            end_date: reservation.end_date.clone(),
        };
        if !form.is_valid() {
            return Err(validation_error("reservation", "Reservation is incomplete"));
        }
        if rental_duration(&reservation.start_date, &reservation.end_date) != reservation.duration {
            return Err(validation_error("duration", "Duration does not match the selected dates"));
        }

        let vehicle = self.vehicles.get(&reservation.car_id).await?;
        if reservation.total_price != total_price(reservation.duration, vehicle.price_per_day)? {
            return Err(validation_error("totalPrice", "Total price does not match the vehicle rate"));
        }

        let created = self
            .reservations
            .create(Reservation {
                status: ReservationStatus::Pending,
                ..reservation
            })
            .await?;

        if let Err(e) = self.legacy.add(created.clone()).await {
            warn!("⚠️ No se pudo guardar la reserva {} en la caché local: {}", created.id, e);
        }

        match self.notifier.reservation_confirmed(&created).await {
            Ok(()) => debug!("📨 Notificación enviada para la reserva {}", created.id),
            Err(ClientError::NotConfigured(_)) => debug!("📨 Webhook de reservas no configurado"),
            Err(e) => warn!("⚠️ Notificación de la reserva {} fallida: {}", created.id, e),
        }

        Ok(created)
    }
}


#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::fakes::RecordingNotifier;
    use super::*;
    use crate::cache::MemoryStore;
    use crate::models::reservation::sample_reservation;
    use crate::models::vehicle::sample_vehicle;
    use crate::models::ReservationDraft;
    use crate::services::reservation_service::fakes::FakeReservationApi;
    use crate::services::vehicle_service::fakes::FakeVehicleApi;
    use crate::utils::errors::AppError;

    struct Fixture {
        service: BookingService,
        drafts: Arc<ReservationDraftHolder>,
        reservations: Arc<ReservationRemoteStore>,
        legacy: Arc<LegacyReservationCache>,
        notifier: Arc<RecordingNotifier>,
        api: Arc<FakeReservationApi>,
    }

    async fn fixture() -> Fixture {
        let vehicles = Arc::new(VehicleCatalogStore::new(Arc::new(FakeVehicleApi::with(vec![
            sample_vehicle("7", "Audi", 200),
        ]))));
        let api = Arc::new(FakeReservationApi::default());
        let reservations = Arc::new(ReservationRemoteStore::new(api.clone()));
        let drafts = Arc::new(ReservationDraftHolder::new());
        let legacy = Arc::new(LegacyReservationCache::load(Arc::new(MemoryStore::new())).await);
        let notifier = Arc::new(RecordingNotifier::default());

        Fixture {
            service: BookingService::new(
                vehicles,
                reservations.clone(),
                drafts.clone(),
                legacy.clone(),
                notifier.clone(),
            ),
            drafts,
            reservations,
            legacy,
            notifier,
            api,
        }
    }

    fn form() -> ReservationForm {
        ReservationForm {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "+212612345678".to_string(),
            start_date: "2025-01-01".to_string(),
            end_date: "2025-01-04".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    #[tokio::test]
    async fn test_quote() {
        let f = fixture().await;
        let quote = f.service.quote("7", "2025-01-01", "2025-01-04").await.unwrap();
        assert_eq!(quote.duration, 3);
        assert_eq!(quote.total_price, Decimal::from(600));

        assert!(matches!(
            f.service.quote("404", "2025-01-01", "2025-01-04").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_checkout_builds_pending_reservation_and_clears_draft() {
        let f = fixture().await;
        f.drafts.set_draft(ReservationDraft::from(form())).await;

        let reservation = f.service.checkout("7", &form(), today()).await.unwrap();

        assert!(!reservation.id.is_empty());
        assert!(reservation.id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(reservation.car_name, "Audi A3");
        assert_eq!(reservation.car_image, "https://img.test/7.jpg");
        assert_eq!(reservation.duration, 3);
        assert_eq!(reservation.total_price, Decimal::from(600));
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert!(f.drafts.draft().await.is_none());
        assert!(f.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_rejects_invalid_form_without_side_effects() {
        let f = fixture().await;
        f.drafts.set_draft(ReservationDraft::from(form())).await;
        let mut bad = form();
        bad.end_date = "2025-01-01".to_string();

        let result = f.service.checkout("7", &bad, today()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(f.drafts.draft().await.is_some());
    }

    #[tokio::test]
    async fn test_confirm_creates_mirrors_and_notifies() {
        let f = fixture().await;
        let pending = f.service.checkout("7", &form(), today()).await.unwrap();

        let created = f.service.confirm(pending).await.unwrap();

        assert_eq!(created.id, "srv-1");
        assert_eq!(f.reservations.snapshot().await.items.len(), 1);
        assert_eq!(f.legacy.list().await[0].id, "srv-1");
        assert_eq!(f.notifier.reservations.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_ignores_notification_failure() {
        let f = fixture().await;
        *f.notifier.failure.lock().unwrap() = Some(ClientError::Transport("timeout".to_string()));

        let created = f
            .service
            .confirm(sample_reservation("1700000000000", ReservationStatus::Pending))
            .await;

        assert!(created.is_ok());
    }

    #[tokio::test]
    async fn test_confirm_rejects_tampered_total() {
        let f = fixture().await;
        let mut pending = f.service.checkout("7", &form(), today()).await.unwrap();
        assert_eq!(pending.total_price, Decimal::from(600));
        pending.total_price = Decimal::ONE;

        let result = f.service.confirm(pending).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(f.api.calls().is_empty());
        assert!(f.legacy.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_rejects_unknown_vehicle() {
        let f = fixture().await;
        let mut orphan = sample_reservation("1700000000000", ReservationStatus::Pending);
        orphan.car_id = "404".to_string();

        let result = f.service.confirm(orphan).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(f.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_rejects_inconsistent_duration() {
        let f = fixture().await;
        let mut tampered = sample_reservation("1700000000000", ReservationStatus::Pending);
        tampered.duration = 10;

        let result = f.service.confirm(tampered).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(f.api.calls().is_empty());
    }
}
