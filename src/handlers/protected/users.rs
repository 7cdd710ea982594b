use axum::{body::Bytes, extract::State, http::StatusCode};
use chrono::Utc;
use uuid::Uuid;

use super::{NO_DELETE_PERMISSION, NO_UPDATE_PERMISSION};
use crate::api::{parse_json, ApiResponse, ApiResult};
use crate::auth::Claims;
use crate::database::models::{DeleteInput, User, UserChanges, UserInput, UserUpdateInput};
use crate::error::ApiError;
use crate::handlers::not_found_as;
use crate::middleware::AuthClaims;
use crate::state::AppState;
use crate::validation::Validate;

const USER_NOT_FOUND: &str = "user with this ID not found";

/// POST /api/v1/user
pub async fn create(State(state): State<AppState>, claims: AuthClaims, body: Bytes) -> ApiResult<User> {
    let claims = claims.fresh(Utc::now())?;
    let input: UserInput = parse_json(&body)?;
    input.validate()?;

    let password = state.passwords.hash(&input.password).await?;
    let user = User::new(input.name, input.email, password);
    state.store.create_user(&user).await?;

    tracing::info!("User {} created user {}", claims.user_id, user.id);
    Ok(ApiResponse::success("user", user))
}

/// PUT /api/v1/user - answers 201 with no body
pub async fn update(State(state): State<AppState>, claims: AuthClaims, body: Bytes) -> Result<StatusCode, ApiError> {
    let claims = claims.fresh(Utc::now())?;
    let input: UserUpdateInput = parse_json(&body)?;

    let existing = state.store.get_user(input.id).await.map_err(not_found_as(USER_NOT_FOUND))?;
    ensure_self(&state, &claims, existing.id, NO_UPDATE_PERMISSION)?;

    input.validate()?;

    let changes = UserChanges {
        name: input.name,
        email: input.email,
        password: state.passwords.hash(&input.password).await?,
    };
    state
        .store
        .update_user(existing.id, &changes)
        .await
        .map_err(not_found_as(USER_NOT_FOUND))?;

    tracing::info!("User {} updated user {}", claims.user_id, existing.id);
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/user - answers 204
pub async fn delete(State(state): State<AppState>, claims: AuthClaims, body: Bytes) -> Result<StatusCode, ApiError> {
    let claims = claims.fresh(Utc::now())?;
    let input: DeleteInput = parse_json(&body)?;
    input.validate()?;

    let existing = state.store.get_user(input.id).await.map_err(not_found_as(USER_NOT_FOUND))?;
    ensure_self(&state, &claims, existing.id, NO_DELETE_PERMISSION)?;

    state
        .store
        .delete_user(existing.id)
        .await
        .map_err(not_found_as(USER_NOT_FOUND))?;

    tracing::info!("User {} deleted user {}", claims.user_id, existing.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Without the ownership flag any authenticated caller may mutate any user.
fn ensure_self(state: &AppState, claims: &Claims, target: Uuid, message: &str) -> Result<(), ApiError> {
    if state.enforce_user_ownership && claims.user_id != target {
        tracing::warn!("User {} may not modify user {}", claims.user_id, target);
        return Err(ApiError::forbidden(message));
    }
    Ok(())
}
