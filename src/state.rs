use std::sync::Arc;
use thiserror::Error;

use crate::auth::{PasswordError, PasswordPolicy, TokenError, TokenService};
use crate::config::AppConfig;
use crate::database::Store;

/// Security settings rejected while building [`AppState`]
#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid token settings: {0}")]
    Token(#[from] TokenError),

    #[error("invalid password settings: {0}")]
    Password(#[from] PasswordError),
}

/// Per-process handles shared by every request, built once by the composition root
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub passwords: PasswordPolicy,
    /// When false, any authenticated caller may update or delete any user.
    pub enforce_user_ownership: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &AppConfig) -> Result<Self, StateError> {
        let security = &config.security;
        Ok(Self {
            store,
            tokens: TokenService::new(&security.jwt_secret, security.jwt_expire_minutes)?,
            passwords: PasswordPolicy::from_config(security)?,
            enforce_user_ownership: security.enforce_user_ownership,
        })
    }
}
