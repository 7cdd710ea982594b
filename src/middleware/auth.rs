use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

pub const EXPIRED_TOKEN_MESSAGE: &str = "unauthorized, check expiration time of your token";

/// Verified token claims, injected by `jwt_auth_middleware`.
///
/// Only the signature has been checked at this point; handlers call
/// [`AuthClaims::fresh`] to reject expired tokens.
#[derive(Clone, Debug)]
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    pub fn fresh(self, now: DateTime<Utc>) -> Result<Claims, ApiError> {
        if self.0.is_expired(now) {
            tracing::warn!("Rejected expired token for user {}", self.0.user_id);
            return Err(ApiError::unauthorized(EXPIRED_TOKEN_MESSAGE));
        }
        Ok(self.0)
    }
}

/// JWT middleware for mutation routes: verifies the bearer token signature and
/// injects the claims into the request
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::bad_request("missing or malformed JWT"))?
        .to_str()
        .map_err(|_| ApiError::bad_request("missing or malformed JWT"))?;

    let claims = state.tokens.verify_header(raw_header).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ApiError::from(e)
    })?;

    tracing::debug!("Token accepted for user {}", claims.user_id);
    request.extensions_mut().insert(AuthClaims(claims));

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthClaims>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("JWT authentication required"))
    }
}
