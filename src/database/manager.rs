use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the data access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(#[from] url::ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the shared connection pool owned by the composition root
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the pool described by `config` and ping it once.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = config.connection_url()?;
        let pool = Self::pool_options(config).connect(&connection_string).await?;

        Self::health_check(&pool).await?;

        info!(
            "Created database pool for {} (max {} connections)",
            config.dbname, config.max_connections
        );
        Ok(pool)
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        let max_lifetime = match config.max_lifetime_secs {
            0 => None, // reuse connections forever
            secs => Some(Duration::from_secs(secs)),
        };

        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.max_idle_connections.min(config.max_connections))
            .max_lifetime(max_lifetime)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn rejects_unparseable_host_before_connecting() {
        let mut db = AppConfig::development().database;
        db.host = "bad host name".to_string();

        let err = DatabaseManager::connect(&db).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidDatabaseUrl(_)));
    }

    #[test]
    fn idle_floor_never_exceeds_pool_size() {
        let mut db = AppConfig::development().database;
        db.max_connections = 2;
        db.max_idle_connections = 8;

        let options = DatabaseManager::pool_options(&db);
        assert_eq!(options.get_max_connections(), 2);
        assert_eq!(options.get_min_connections(), 2);
        assert_eq!(options.get_max_lifetime(), None);
    }
}
