// POST /api/v1/sign-in and POST /api/v1/sign-up

use axum::{body::Bytes, extract::State};

use crate::api::{parse_json, ApiResponse, ApiResult};
use crate::database::models::{SignInInput, User, UserInput};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::Validate;

const NO_MATCHING_USER: &str = "user with the given email and password is not found";

/// Exchange an email and password for an access token.
///
/// An unknown email and a wrong password both answer 404 with the same message
/// after the same amount of password work.
pub async fn sign_in(State(state): State<AppState>, body: Bytes) -> ApiResult<String> {
    let input: SignInInput = parse_json(&body)?;

    let Some(user) = state.store.find_user_by_email(&input.email).await? else {
        state.passwords.verify_missing(&input.password).await?;
        tracing::warn!("Sign-in for unknown email");
        return Err(ApiError::not_found(NO_MATCHING_USER));
    };

    if !state.passwords.verify(&input.password, &user.password).await? {
        tracing::warn!("Sign-in with wrong password for user {}", user.id);
        return Err(ApiError::not_found(NO_MATCHING_USER));
    }

    let token = state.tokens.issue(user.id)?;
    tracing::info!("Issued access token for user {}", user.id);

    Ok(ApiResponse::success("access_token", token))
}

/// Register a new user.
///
/// A failed insert (duplicate email included) answers 404, as existing clients expect.
pub async fn sign_up(State(state): State<AppState>, body: Bytes) -> ApiResult<User> {
    let input: UserInput = parse_json(&body)?;
    input.validate()?;

    let password = state.passwords.hash(&input.password).await?;
    let user = User::new(input.name, input.email, password);

    if let Err(e) = state.store.create_user(&user).await {
        tracing::warn!("Sign-up insert failed: {}", e);
        return Err(ApiError::not_found(NO_MATCHING_USER));
    }

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::success("user", user))
}
