//! In-process store for tests and local experiments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{House, HouseChanges, User, UserChanges};
use crate::database::{DatabaseError, HouseStore, Store, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    houses: HashMap<Uuid, House>,
}

/// `Store` over in-memory maps.
///
/// Clones share the same tables. `set_failing(true)` makes every call return a
/// query error, which exercises the 500/503 paths without a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("memory store is in failing mode".to_string()));
        }
        Ok(())
    }
}

fn by_creation<T>(mut rows: Vec<T>, created: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    rows.sort_by_key(|row| created(row));
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(by_creation(tables.users.values().cloned().collect(), |u| u.created_at))
    }

    async fn get_user(&self, id: Uuid) -> Result<User, DatabaseError> {
        self.check()?;
        self.tables
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::QueryError(format!("email {} already registered", user.email)));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))?;
        user.name = changes.name.clone();
        user.email = changes.email.clone();
        user.password = changes.password.clone();
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), DatabaseError> {
        self.check()?;
        self.tables
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))
    }
}

#[async_trait]
impl HouseStore for MemoryStore {
    async fn list_houses(&self) -> Result<Vec<House>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(by_creation(tables.houses.values().cloned().collect(), |h| h.created_at))
    }

    async fn get_house(&self, id: Uuid) -> Result<House, DatabaseError> {
        self.check()?;
        self.tables
            .read()
            .await
            .houses
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("house {}", id)))
    }

    async fn create_house(&self, house: &House) -> Result<(), DatabaseError> {
        self.check()?;
        self.tables.write().await.houses.insert(house.id, house.clone());
        Ok(())
    }

    async fn update_house(&self, id: Uuid, changes: &HouseChanges) -> Result<(), DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let house = tables
            .houses
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("house {}", id)))?;
        house.description = changes.description.clone();
        house.address = changes.address.clone();
        Ok(())
    }

    async fn delete_house(&self, id: Uuid) -> Result<(), DatabaseError> {
        self.check()?;
        self.tables
            .write()
            .await
            .houses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("house {}", id)))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}
