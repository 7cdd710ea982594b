use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{House, HouseChanges, User, UserChanges};
use crate::database::store::{HouseStore, Store, UserStore};

const USER_COLUMNS: &str = "id, name, email, password, created_at";
const HOUSE_COLUMNS: &str = "id, description, address, owner_id, created_at";

/// `Store` backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn affected_one(rows: u64, what: &str, id: Uuid) -> Result<(), DatabaseError> {
    if rows == 0 {
        return Err(DatabaseError::NotFound(format!("{} {} not found", what, id)));
    }
    Ok(())
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {} not found", id)))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &User) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO users (id, name, email, password, created_at) VALUES ($1, $2, $3, $4, $5)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET name = $2, email = $3, password = $4 WHERE id = $1")
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(&changes.password)
            .execute(&self.pool)
            .await?;

        affected_one(result.rows_affected(), "user", id)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected_one(result.rows_affected(), "user", id)
    }
}

#[async_trait]
impl HouseStore for PgStore {
    async fn list_houses(&self) -> Result<Vec<House>, DatabaseError> {
        let houses = sqlx::query_as::<_, House>(&format!(
            "SELECT {} FROM houses ORDER BY created_at",
            HOUSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(houses)
    }

    async fn get_house(&self, id: Uuid) -> Result<House, DatabaseError> {
        sqlx::query_as::<_, House>(&format!("SELECT {} FROM houses WHERE id = $1", HOUSE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("house {} not found", id)))
    }

    async fn create_house(&self, house: &House) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO houses (id, description, address, owner_id, created_at) VALUES ($1, $2, $3, $4, $5)")
            .bind(house.id)
            .bind(&house.description)
            .bind(&house.address)
            .bind(house.owner_id)
            .bind(house.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_house(&self, id: Uuid, changes: &HouseChanges) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE houses SET description = $2, address = $3 WHERE id = $1")
            .bind(id)
            .bind(&changes.description)
            .bind(&changes.address)
            .execute(&self.pool)
            .await?;

        affected_one(result.rows_affected(), "house", id)
    }

    async fn delete_house(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM houses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected_one(result.rows_affected(), "house", id)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
