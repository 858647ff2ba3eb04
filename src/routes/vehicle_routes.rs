use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::dto::{ApiResponse, CatalogQuery, CatalogResponse};
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
}

/// Catálogo filtrado; `refresh=true` fuerza una nueva carga
async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<CatalogResponse>>, AppError> {
    if query.refresh {
        state.vehicles.list().await?;
    } else {
        state.vehicles.ensure_loaded().await?;
    }

    let filter = query.filter();
    let cars = state.vehicles.filter(&filter).await;
    let snapshot = state.vehicles.snapshot().await;

    Ok(Json(ApiResponse::success(CatalogResponse {
        total: cars.len(),
        cars,
        status: snapshot.status,
        loading: snapshot.loading,
        error: snapshot.error,
        filters_active: filter.is_active(),
    })))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = state.vehicles.get(&id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}
