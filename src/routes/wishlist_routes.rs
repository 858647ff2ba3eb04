use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};

use crate::dto::{AddToWishlistRequest, ApiResponse};
use crate::services::WishlistSnapshot;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_wishlist_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wishlist).post(add_to_wishlist).delete(clear_wishlist))
        .route("/:id", delete(remove_from_wishlist))
}

async fn get_wishlist(State(state): State<AppState>) -> Json<ApiResponse<WishlistSnapshot>> {
    Json(ApiResponse::success(state.wishlist.snapshot().await))
}

/// Añade una copia del vehículo tal como está ahora en el catálogo
async fn add_to_wishlist(
    State(state): State<AppState>,
    Json(request): Json<AddToWishlistRequest>,
) -> Result<Json<ApiResponse<WishlistSnapshot>>, AppError> {
    let vehicle = state.vehicles.get(&request.vehicle_id).await?;
    Ok(Json(ApiResponse::success(state.wishlist.add(vehicle).await)))
}

async fn remove_from_wishlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<WishlistSnapshot>> {
    Json(ApiResponse::success(state.wishlist.remove(&id).await))
}

async fn clear_wishlist(State(state): State<AppState>) -> Json<ApiResponse<WishlistSnapshot>> {
    Json(ApiResponse::success(state.wishlist.clear().await))
}
