/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * database loading, mailer selection, state creation and route
 * configuration.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::mail::{mailer_from_config, Mailer};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. **Validate Config**: reject unusable settings before touching anything
/// 2. **Load Database**: connect the pool and run migrations
/// 3. **Pick Mailer**: SMTP when configured, log-only otherwise
/// 4. **Create Router**: mount every route on the shared `AppState`
pub async fn create_app(config: AppConfig) -> Result<Router, BackendError> {
    config
        .validate()
        .map_err(|e| BackendError::internal(format!("Invalid configuration: {}", e)))?;

    let db_pool = load_database(&config).await?;
    let mailer = mailer_from_config(&config)?;

    tracing::info!("Server initialized ({:?} environment)", config.environment);
    Ok(create_app_with(db_pool, config, mailer))
}

/// Build the application from parts that are already set up
///
/// Tests use this with an in-memory pool and a recording mailer.
pub fn create_app_with(db_pool: sqlx::SqlitePool, config: AppConfig, mailer: Arc<dyn Mailer>) -> Router {
    create_router(AppState::new(db_pool, config, mailer))
}
