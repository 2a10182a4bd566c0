/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite connection pool
 * - The loaded configuration
 * - The mailer used for account emails
 * - The rate-limit counters for the auth routes
 *
 * Every field is cheap to clone (`Arc` or pool handle), so the whole state
 * is cloned into each request.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     let _ = pool.acquire().await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::mail::Mailer;
use crate::backend::middleware::rate_limit::{RateLimiter, RATE_LIMIT_WINDOW};
use crate::shared::config::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Configuration the server was started with
    pub config: Arc<AppConfig>,

    /// Delivery for confirmation and reset emails
    pub mailer: Arc<dyn Mailer>,

    /// Per-address counters for `/api/auth`
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_max, RATE_LIMIT_WINDOW);
        Self {
            db_pool,
            config: Arc::new(config),
            mailer,
            rate_limiter,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for RateLimiter {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rate_limiter.clone()
    }
}
