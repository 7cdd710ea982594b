use axum::{body::Bytes, extract::State, http::StatusCode};
use chrono::Utc;

use super::{NO_DELETE_PERMISSION, NO_UPDATE_PERMISSION};
use crate::api::{parse_json, ApiResponse, ApiResult};
use crate::auth::Claims;
use crate::database::models::{DeleteInput, House, HouseChanges, HouseCreateInput, HouseUpdateInput};
use crate::error::ApiError;
use crate::handlers::not_found_as;
use crate::middleware::AuthClaims;
use crate::state::AppState;
use crate::validation::Validate;

const HOUSE_NOT_FOUND: &str = "house with this ID not found";

/// POST /api/v1/house - the caller becomes the owner
pub async fn create(State(state): State<AppState>, claims: AuthClaims, body: Bytes) -> ApiResult<House> {
    let claims = claims.fresh(Utc::now())?;
    let input: HouseCreateInput = parse_json(&body)?;

    let house = House::new(claims.user_id, input);
    house.validate()?;
    state.store.create_house(&house).await?;

    tracing::info!("User {} created house {}", claims.user_id, house.id);
    Ok(ApiResponse::success("house", house))
}

/// PUT /api/v1/house
///
/// Only `description` and `address` are written; the owner never changes.
pub async fn update(State(state): State<AppState>, claims: AuthClaims, body: Bytes) -> Result<StatusCode, ApiError> {
    let claims = claims.fresh(Utc::now())?;
    let input: HouseUpdateInput = parse_json(&body)?;

    let existing = state.store.get_house(input.id).await.map_err(not_found_as(HOUSE_NOT_FOUND))?;
    ensure_owner(&claims, &existing, NO_UPDATE_PERMISSION)?;

    input.validate()?;

    state
        .store
        .update_house(existing.id, &HouseChanges::from(input))
        .await
        .map_err(not_found_as(HOUSE_NOT_FOUND))?;

    tracing::info!("User {} updated house {}", claims.user_id, existing.id);
    Ok(StatusCode::OK)
}

/// DELETE /api/v1/house
pub async fn delete(State(state): State<AppState>, claims: AuthClaims, body: Bytes) -> Result<StatusCode, ApiError> {
    let claims = claims.fresh(Utc::now())?;
    let input: DeleteInput = parse_json(&body)?;
    input.validate()?;

    let existing = state.store.get_house(input.id).await.map_err(not_found_as(HOUSE_NOT_FOUND))?;
    ensure_owner(&claims, &existing, NO_DELETE_PERMISSION)?;

    state
        .store
        .delete_house(existing.id)
        .await
        .map_err(not_found_as(HOUSE_NOT_FOUND))?;

    tracing::info!("User {} deleted house {}", claims.user_id, existing.id);
    Ok(StatusCode::NO_CONTENT)
}

fn ensure_owner(claims: &Claims, house: &House, message: &str) -> Result<(), ApiError> {
    if claims.user_id != house.owner_id {
        tracing::warn!("User {} is not the owner of house {}", claims.user_id, house.id);
        return Err(ApiError::forbidden(message));
    }
    Ok(())
}
