//! Panel de admin: vehículos, imágenes y reservas (requiere JWT de admin)

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    middleware::from_fn_with_state,
    routing::{post, put},
    Json, Router,
};
use tracing::warn;

use crate::clients::UploadedFile;
use crate::dto::{
    AdminReservationsResponse, ApiResponse, MediaUploadResponse, ReservationSearchQuery,
    StatusUpdateRequest,
};
use crate::middleware::require_admin;
use crate::models::{Reservation, Vehicle, VehicleInput};
use crate::services::media_service::{upload_vehicle_image, MAX_IMAGE_BYTES};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/cars", post(create_vehicle))
        .route("/cars/:id", put(update_vehicle).delete(delete_vehicle))
        .route(
            "/media",
            post(upload_media).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024)),
        )
        .route("/reservations", axum::routing::get(list_reservations))
        .route("/reservations/refresh", post(refresh_reservations))
        .route(
            "/reservations/:id",
            put(update_reservation).delete(delete_reservation),
        )
        .route("/reservations/:id/status", put(update_reservation_status))
        .route_layer(from_fn_with_state(state, require_admin))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = state.vehicles.add(input).await?;
    Ok(Json(ApiResponse::success_with_message(vehicle, "Car added")))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = state.vehicles.edit(&id, input).await?;
    Ok(Json(ApiResponse::success_with_message(vehicle, "Car updated")))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.vehicles.delete(&id).await?;
    Ok(Json(ApiResponse::message("Car deleted")))
}

/// Multipart con un campo `file`
async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<MediaUploadResponse>>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read file: {}", e)))?;

        let url = upload_vehicle_image(
            state.media.as_ref(),
            UploadedFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            },
        )
        .await?;
        return Ok(Json(ApiResponse::success(MediaUploadResponse { url })));
    }

    Err(bad_request_error("Missing 'file' field"))
}

async fn reservations_view(state: &AppState, search: &str) -> AdminReservationsResponse {
    let (reservations, stats) = state.reservations.search(search).await;
    let snapshot = state.reservations.snapshot().await;
    AdminReservationsResponse {
        reservations,
        stats,
        status: snapshot.status,
        loading: snapshot.loading,
        error: snapshot.error,
    }
}

async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationSearchQuery>,
) -> Result<Json<ApiResponse<AdminReservationsResponse>>, AppError> {
    state.reservations.ensure_loaded().await?;
    let search = query.search.unwrap_or_default();
    Ok(Json(ApiResponse::success(reservations_view(&state, &search).await)))
}

/// Botón "Retry": vuelve a cargar la colección
async fn refresh_reservations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdminReservationsResponse>>, AppError> {
    state.reservations.list().await?;
    Ok(Json(ApiResponse::success(reservations_view(&state, "").await)))
}

async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(reservation): Json<Reservation>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let updated = state.reservations.update(&id, reservation).await?;
    Ok(Json(ApiResponse::success(updated)))
}

async fn update_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    state.reservations.ensure_loaded().await?;
    let updated = state.reservations.update_status(&id, request.status).await?;

    if let Err(e) = state
        .legacy_reservations
        .update_status(&id, updated.status)
        .await
    {
        warn!("⚠️ No se pudo actualizar la reserva local {}: {}", id, e);
    }

    Ok(Json(ApiResponse::success(updated)))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.reservations.delete(&id).await?;
    Ok(Json(ApiResponse::message("Reservation deleted")))
}
