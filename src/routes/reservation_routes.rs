use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;

use crate::dto::{ApiResponse, CheckoutRequest, QuoteRequest};
use crate::models::{Reservation, ReservationDraft};
use crate::services::BookingQuote;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/draft", get(get_draft).put(set_draft).delete(clear_draft))
        .route("/quote", post(quote))
        .route("/checkout", post(checkout))
        .route("/confirm", post(confirm))
        .route("/mine", get(my_reservations).delete(forget_my_reservations))
}

async fn get_draft(State(state): State<AppState>) -> Json<ApiResponse<Option<ReservationDraft>>> {
    Json(ApiResponse::success(state.drafts.draft().await))
}

async fn set_draft(
    State(state): State<AppState>,
    Json(draft): Json<ReservationDraft>,
) -> Json<ApiResponse<ReservationDraft>> {
    state.drafts.set_draft(draft.clone()).await;
    Json(ApiResponse::success(draft))
}

async fn clear_draft(State(state): State<AppState>) -> Json<ApiResponse<()>> {
    state.drafts.clear_draft().await;
    Json(ApiResponse::message("Draft cleared"))
}

async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<ApiResponse<BookingQuote>>, AppError> {
    let quote = state
        .booking
        .quote(&request.car_id, &request.start_date, &request.end_date)
        .await?;
    Ok(Json(ApiResponse::success(quote)))
}

/// "Continue to payment": devuelve la reserva pendiente para el resumen
async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let today = Local::now().date_naive();
    let reservation = state
        .booking
        .checkout(&request.car_id, &request.form, today)
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

async fn confirm(
    State(state): State<AppState>,
    Json(reservation): Json<Reservation>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let created = state.booking.confirm(reservation).await?;
    Ok(Json(ApiResponse::success_with_message(
        created,
        "Reservation confirmed",
    )))
}

async fn my_reservations(State(state): State<AppState>) -> Json<ApiResponse<Vec<Reservation>>> {
    Json(ApiResponse::success(state.legacy_reservations.list().await))
}

/// Vacía la caché local; las reservas del backend no se tocan
async fn forget_my_reservations(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>, AppError> {
    state.legacy_reservations.clear().await?;
    Ok(Json(ApiResponse::message("Local reservations cleared")))
}
