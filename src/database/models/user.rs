use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash, or the plain value under the legacy password policy
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Column values written by `UPDATE users`
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Body of sign-up and of authenticated user creation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdateInput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// New row with a fresh identifier; `password` must already be run through the password policy.
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            created_at: Utc::now(),
        }
    }
}
