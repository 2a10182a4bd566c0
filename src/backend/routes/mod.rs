//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation
//! ├── auth_routes.rs    - /api/auth endpoints
//! └── budget_routes.rs  - /api/budgets endpoints
//! ```
//!
//! # Layers
//!
//! - `/api/auth/*` is rate limited per source address; the account routes
//!   (`/user`, `/update-password`, `/check-password`, `/update-profile`)
//!   also require a bearer token
//! - `/api/budgets/*` requires a bearer token on every route
//! - Every request passes through `TraceLayer`

/// Main router creation
pub mod router;

/// Authentication routes
pub mod auth_routes;

/// Budget and expense routes
pub mod budget_routes;

pub use router::create_router;
