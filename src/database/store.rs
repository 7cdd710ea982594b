use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{House, HouseChanges, User, UserChanges};

/// Data access for the `users` table. Each call is a single statement.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;

    /// `DatabaseError::NotFound` when no row has this id.
    async fn get_user(&self, id: Uuid) -> Result<User, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn create_user(&self, user: &User) -> Result<(), DatabaseError>;

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> Result<(), DatabaseError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), DatabaseError>;
}

/// Data access for the `houses` table. Each call is a single statement.
#[async_trait]
pub trait HouseStore: Send + Sync {
    async fn list_houses(&self) -> Result<Vec<House>, DatabaseError>;

    /// `DatabaseError::NotFound` when no row has this id.
    async fn get_house(&self, id: Uuid) -> Result<House, DatabaseError>;

    async fn create_house(&self, house: &House) -> Result<(), DatabaseError>;

    async fn update_house(&self, id: Uuid, changes: &HouseChanges) -> Result<(), DatabaseError>;

    async fn delete_house(&self, id: Uuid) -> Result<(), DatabaseError>;
}

/// Everything the handlers need from the relational store
#[async_trait]
pub trait Store: UserStore + HouseStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
