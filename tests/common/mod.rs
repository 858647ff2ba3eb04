//! Colaboradores en memoria para las pruebas del router

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use autogo_storefront::cache::MemoryStore;
use autogo_storefront::clients::{
    ClientError, GenerativeModel, MediaUploader, Notifier, ReservationApi, UploadedFile, VehicleApi,
};
use autogo_storefront::config::EnvironmentConfig;
use autogo_storefront::create_app;
use autogo_storefront::models::{ContactMessage, FuelType, Reservation, Transmission, Vehicle, VehicleInput};
use autogo_storefront::services::{AuthService, JwtService};
use autogo_storefront::state::{AppState, Collaborators};

pub const ADMIN_EMAIL: &str = "admin@autogo.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn vehicle(id: &str, brand: &str, price: i64) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        brand: brand.to_string(),
        model: "A3".to_string(),
        year: 2022,
        color: "Black".to_string(),
        price_per_day: Decimal::from(price),
        seats: 5,
        category: "Sedan".to_string(),
        transmission: Transmission::Automatic,
        fuel: FuelType::Diesel,
        consumption: Decimal::new(55, 1),
        equipments: vec!["GPS".to_string()],
        description: String::new(),
        image: format!("https://img.test/{}.jpg", id),
    }
}

#[derive(Default)]
pub struct Backend {
    pub vehicles: Mutex<Vec<Vehicle>>,
    pub reservations: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl VehicleApi for Backend {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ClientError> {
        Ok(self.vehicles.lock().unwrap().clone())
    }

    async fn create_vehicle(&self, input: &VehicleInput) -> Result<Vehicle, ClientError> {
        let mut vehicles = self.vehicles.lock().unwrap();
        let mut created = vehicle(&(vehicles.len() + 1).to_string(), &input.brand, 0);
        created.model = input.model.clone();
        created.price_per_day = input.price_per_day;
        vehicles.push(created.clone());
        Ok(created)
    }

    async fn update_vehicle(&self, id: &str, _input: &VehicleInput) -> Result<Vehicle, ClientError> {
        Err(ClientError::Server {
            status: 404,
            message: format!("Car {} not found", id),
        })
    }

    async fn delete_vehicle(&self, id: &str) -> Result<(), ClientError> {
        self.vehicles.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReservationApi for Backend {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        Ok(self.reservations.lock().unwrap().clone())
    }

    async fn create_reservation(&self, reservation: &Reservation) -> Result<Reservation, ClientError> {
        let mut reservations = self.reservations.lock().unwrap();
        let mut created = reservation.clone();
        created.id = format!("r{}", reservations.len() + 1);
        reservations.push(created.clone());
        Ok(created)
    }

    async fn update_reservation(&self, id: &str, reservation: &Reservation) -> Result<Reservation, ClientError> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                *slot = reservation.clone();
                slot.id = id.to_string();
                Ok(slot.clone())
            }
            None => Err(ClientError::Server {
                status: 404,
                message: "Reservation not found".to_string(),
            }),
        }
    }

    async fn delete_reservation(&self, id: &str) -> Result<(), ClientError> {
        self.reservations.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

pub struct SilentModel;

#[async_trait]
impl GenerativeModel for SilentModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ClientError> {
        Err(ClientError::NotConfigured("GEMINI_API_KEY"))
    }
}

pub struct FixedUploader;

#[async_trait]
impl MediaUploader for FixedUploader {
    async fn upload(&self, file: UploadedFile) -> Result<String, ClientError> {
        Ok(format!("https://media.test/{}", file.file_name))
    }
}

#[derive(Default)]
pub struct Inbox {
    pub contacts: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl Notifier for Inbox {
    async fn reservation_confirmed(&self, _reservation: &Reservation) -> Result<(), ClientError> {
        Ok(())
    }

    async fn contact_message(&self, message: &ContactMessage) -> Result<(), ClientError> {
        self.contacts.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<Backend>,
    pub store: Arc<MemoryStore>,
    pub inbox: Arc<Inbox>,
}

pub async fn create_test_app(vehicles: Vec<Vehicle>) -> TestApp {
    let backend = Arc::new(Backend::default());
    *backend.vehicles.lock().unwrap() = vehicles;
    let store = Arc::new(MemoryStore::new());
    let inbox = Arc::new(Inbox::default());

    let values: HashMap<String, String> = [("API_BASE_URL", "http://backend.test")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = EnvironmentConfig::from_map(&values).unwrap();

    let hash = bcrypt::hash(ADMIN_PASSWORD, 4).unwrap();
    let auth = AuthService::with_credentials(
        ADMIN_EMAIL.to_string(),
        hash,
        JwtService::new("integration-secret", 3600),
    );

    let collaborators = Collaborators {
        vehicle_api: backend.clone(),
        reservation_api: backend.clone(),
        model: Arc::new(SilentModel),
        media: Arc::new(FixedUploader),
        notifier: inbox.clone(),
    };

    let state = AppState::build(config, store.clone(), collaborators, auth).await;
    TestApp {
        router: create_app(state),
        backend,
        store,
        inbox,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .json(
                "POST",
                "/api/auth/login",
                serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }
}
