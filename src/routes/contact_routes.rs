use axum::{extract::State, routing::post, Json, Router};

use crate::dto::ApiResponse;
use crate::models::ContactMessage;
use crate::services::contact_service::send_contact;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/", post(contact))
}

async fn contact(
    State(state): State<AppState>,
    Json(message): Json<ContactMessage>,
) -> Result<Json<ApiResponse<ContactMessage>>, AppError> {
    let sent = send_contact(state.notifier.as_ref(), message).await?;
    Ok(Json(ApiResponse::success_with_message(sent, "Message sent")))
}
