use axum::{extract::State, routing::post, Json, Router};

use crate::dto::ApiResponse;
use crate::models::{LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    // bcrypt es costoso en CPU
    let auth = state.auth.clone();
    let response = tokio::task::spawn_blocking(move || auth.authenticate(&request))
        .await
        .map_err(|e| AppError::Internal(format!("Login task failed: {}", e)))??;
    Ok(Json(ApiResponse::success(response)))
}
