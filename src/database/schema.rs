use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

/// Idempotent DDL for the two application tables.
///
/// `houses.owner_id` has no foreign key; deleting a user keeps their houses.
pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY,
        name        VARCHAR(30)  NOT NULL DEFAULT '',
        email       VARCHAR(255) NOT NULL UNIQUE,
        password    VARCHAR(255) NOT NULL,
        created_at  TIMESTAMPTZ  NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS houses (
        id           UUID PRIMARY KEY,
        description  TEXT        NOT NULL DEFAULT '',
        address      TEXT        NOT NULL DEFAULT '',
        owner_id     UUID        NOT NULL,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS houses_owner_id_idx ON houses (owner_id)",
];

pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema is up to date ({} statements)", STATEMENTS.len());
    Ok(())
}
