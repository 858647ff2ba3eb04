//! Recomendaciones por IA
//!
//! Se envían las preferencias del usuario y una vista reducida del catálogo
//! al modelo generativo, que responde con un array JSON de ids. La respuesta
//! puede venir envuelta en bloques markdown; sólo se aceptan ids del catálogo.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::clients::{ClientError, GenerativeModel};
use crate::models::{RecommendationCandidate, UserPreferences, Vehicle};
use crate::services::remote_state::RequestStatus;
use crate::utils::errors::AppResult;
use crate::utils::ids::BackendId;

/// Estado de la última recomendación
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationState {
    pub status: RequestStatus,
    pub error: Option<String>,
    pub recommendations: Vec<Vehicle>,
}

pub fn build_prompt(preferences: &UserPreferences, vehicles: &[Vehicle]) -> String {
    let candidates: Vec<RecommendationCandidate<'_>> = vehicles.iter().map(Into::into).collect();
    let catalog = serde_json::to_string(&candidates).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are an expert car recommendation assistant for AutoGo.\n\
         Based on the following user preferences and the list of available cars, return a JSON array containing ONLY the IDs of the top 3 recommended cars.\n\
         \n\
         User Preferences:\n\
         - Budget Level: {}\n\
         - Primary Purpose: {}\n\
         - Minimum Seats: {}\n\
         - Preferred Fuel: {}\n\
         \n\
         Available Cars (JSON):\n\
         {}\n\
         \n\
         Return ONLY the JSON array of IDs, for example: [\"1\", \"2\", \"3\"].\n\
         Do not include any other text, markdown blocks, or explanations. Just the array.",
        preferences.budget, preferences.purpose, preferences.seats, preferences.fuel, catalog
    )
}

/// Quitar las vallas ```json / ``` y espacios
pub fn clean_response(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Leer el array de ids devuelto por el modelo (strings o números)
pub fn parse_ids(text: &str) -> Result<Vec<String>, ClientError> {
    let cleaned = clean_response(text);
    serde_json::from_str::<Vec<BackendId>>(&cleaned)
        .map(|ids| ids.into_iter().map(|id| id.0).collect())
        .map_err(|e| ClientError::InvalidResponse(format!("model answer is not a JSON id array: {}", e)))
}

/// Vehículos del catálogo en el orden del modelo, sin duplicados ni ids desconocidos
pub fn select_vehicles(ids: &[String], catalog: &[Vehicle]) -> Vec<Vehicle> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.to_string()))
        .filter_map(|id| catalog.iter().find(|v| &v.id == id).cloned())
        .collect()
}

pub struct RecommendationService {
    model: Arc<dyn GenerativeModel>,
    state: RwLock<RecommendationState>,
}

impl RecommendationService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            state: RwLock::new(RecommendationState::default()),
        }
    }

    pub async fn state(&self) -> RecommendationState {
        self.state.read().await.clone()
    }

    pub async fn recommend(
        &self,
        preferences: &UserPreferences,
        catalog: &[Vehicle],
    ) -> AppResult<Vec<Vehicle>> {
        self.state.write().await.status = RequestStatus::Loading;

        let result = self.ask_model(preferences, catalog).await;

        let mut state = self.state.write().await;
        match result {
            Ok(vehicles) => {
                info!("🤖 {} vehículos recomendados", vehicles.len());
                state.status = RequestStatus::Succeeded;
                state.error = None;
                state.recommendations = vehicles.clone();
                Ok(vehicles)
            }
            Err(e) => {
                warn!("❌ Error de recomendación: {}", e);
                state.status = RequestStatus::Failed;
                state.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    async fn ask_model(
        &self,
        preferences: &UserPreferences,
        catalog: &[Vehicle],
    ) -> Result<Vec<Vehicle>, ClientError> {
        let prompt = build_prompt(preferences, catalog);
        let answer = self.model.generate(&prompt).await?;
        let ids = parse_ids(&answer)?;
        Ok(select_vehicles(&ids, catalog))
    }
}
