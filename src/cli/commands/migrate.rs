use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager};

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    schema::migrate(&pool).await.context("failed to apply schema")?;
    pool.close().await;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "migrated": true, "database": config.database.dbname })),
        OutputFormat::Text => println!("Schema applied to {}", config.database.dbname),
    }
    Ok(())
}
