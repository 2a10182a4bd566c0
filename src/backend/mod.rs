//! Backend Module
//!
//! This module contains all server-side code for CashTracker: an Axum HTTP
//! JSON API over a SQLite database.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, confirmation, login, passwords, sessions
//! - **`budgets`** - Budget persistence and handlers
//! - **`expenses`** - Expense persistence and handlers
//! - **`middleware`** - Auth gate, ownership chain, rate limiting
//! - **`mail`** - Account email delivery
//! - **`extract`** - JSON body extractor
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── budgets/        - Budgets
//! ├── expenses/       - Expenses
//! ├── middleware/     - Request middleware and extractors
//! ├── mail/           - Outgoing email
//! ├── extract.rs      - Body extractor
//! └── error/          - Error types
//! ```
//!
//! # Request Lifecycle
//!
//! For every budget or expense request:
//!
//! 1. **Auth gate**: bearer token verified, user loaded
//! 2. **Path ids**: `budgetId`/`expenseId` must be positive integers
//! 3. **Existence**: the budget (and expense) must exist
//! 4. **Ownership**: the budget belongs to the caller, the expense to the budget
//! 5. **Handler**: body validation, then the action
//!
//! # Error Handling
//!
//! Handlers, extractors and middleware all return `BackendError`, which
//! renders as `{"error": ...}` or `{"errors": [...]}` with the matching
//! status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Budgets
pub mod budgets;

/// Expenses
pub mod expenses;

/// Middleware for request processing
pub mod middleware;

/// Outgoing email
pub mod mail;

/// Request body extraction
pub mod extract;

pub use error::BackendError;
pub use server::{create_app, create_app_with, AppState};
