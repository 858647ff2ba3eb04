use axum::{extract::State, routing::post, Json, Router};

use crate::dto::ApiResponse;
use crate::models::{UserPreferences, Vehicle};
use crate::services::RecommendationState;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_recommendation_router() -> Router<AppState> {
    Router::new().route("/", post(recommend).get(last_recommendation))
}

async fn recommend(
    State(state): State<AppState>,
    Json(preferences): Json<UserPreferences>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    state.vehicles.ensure_loaded().await?;
    let catalog = state.vehicles.snapshot().await.items;
    let picked = state.recommendations.recommend(&preferences, &catalog).await?;
    Ok(Json(ApiResponse::success(picked)))
}

async fn last_recommendation(State(state): State<AppState>) -> Json<ApiResponse<RecommendationState>> {
    Json(ApiResponse::success(state.recommendations.state().await))
}
