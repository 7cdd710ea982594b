use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::House;
use crate::error::ApiError;
use crate::handlers::{not_found_as, parse_id};
use crate::state::AppState;

/// GET /api/v1/houses
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<House>> {
    let houses = state.store.list_houses().await.map_err(|e| {
        tracing::error!("Failed to list houses: {}", e);
        ApiError::not_found("houses were not found")
    })?;

    Ok(ApiResponse::list("houses", houses))
}

/// GET /api/v1/house/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<House> {
    let id = parse_id(&id)?;
    let house = state
        .store
        .get_house(id)
        .await
        .map_err(not_found_as("house with the given ID is not found"))?;

    Ok(ApiResponse::success("house", house))
}
