/**
 * Database Configuration
 *
 * Connects the SQLite pool described by `AppConfig::database_url` and
 * applies the migrations in `migrations/`.
 *
 * Unlike optional services, the database is required: a connection or
 * migration failure stops server startup.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::shared::config::AppConfig;

const MAX_CONNECTIONS: u32 = 5;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Parses `database_url`, creating the file if needed
/// 2. Enables foreign keys so deletes cascade
/// 3. Runs database migrations
pub async fn load_database(config: &AppConfig) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            BackendError::from(e)
        })?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Fresh in-memory database with the schema applied
///
/// A single connection that is never recycled, since every new in-memory
/// connection would be a separate empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, BackendError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), BackendError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        BackendError::internal(format!("Migration failed: {}", e))
    })?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
