//! Middleware Module
//!
//! This module contains the HTTP middleware and request extractors that run
//! before handlers.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer token verification and the `AuthUser` extractor
//! - **`ownership`** - Budget/expense resolution and access checks
//! - **`rate_limit`** - Fixed-window limiter for the auth routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use cashtracker::backend::middleware::auth_middleware;
//! use cashtracker::backend::server::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;
pub mod ownership;
pub mod rate_limit;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use ownership::{BudgetContext, ExpenseContext, OwnedBudget, OwnedExpense};
pub use rate_limit::{rate_limit_middleware, RateLimiter};
