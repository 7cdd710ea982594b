use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::{not_found_as, parse_id};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.store.list_users().await.map_err(|e| {
        tracing::error!("Failed to list users: {}", e);
        ApiError::not_found("users were not found")
    })?;

    Ok(ApiResponse::list("users", users))
}

/// GET /api/v1/user/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let id = parse_id(&id)?;
    let user = state
        .store
        .get_user(id)
        .await
        .map_err(not_found_as("user with the given ID is not found"))?;

    Ok(ApiResponse::success("user", user))
}
