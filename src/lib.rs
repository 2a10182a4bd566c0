//! CashTracker - Main Library
//!
//! CashTracker is a personal finance tracking API. Users register, confirm
//! their accounts with an emailed token, authenticate with a JWT, and manage
//! budgets that contain expenses.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types that do not depend on the server stack
//!   - Budget and expense data structures, monetary amounts
//!   - Field-level validation errors
//!   - Application configuration
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server, routing and middleware
//!   - Authentication, confirmation tokens and JWT sessions
//!   - Budget and expense persistence with the ownership chain
//!   - Outgoing email
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use cashtracker::backend::server::init::create_app;
//! use cashtracker::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Request Flow
//!
//! Every budget and expense request passes through the same pipeline:
//!
//! ```text
//! Auth Gate -> path id validation -> existence lookup -> ownership check -> handler
//! ```
//!
//! Each step returns a `Result` and short-circuits on the first failure.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
