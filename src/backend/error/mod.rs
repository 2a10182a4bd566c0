//! Backend Error Module
//!
//! This module defines the single error type that flows out of every handler,
//! extractor and middleware in the backend.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - `BackendError` definition, constructors and status mapping
//! - **`conversion`** - `IntoResponse` and `From` implementations
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Response Format
//!
//! Validation failures list every violation:
//!
//! ```json
//! { "errors": [ { "type": "field", "msg": "Invalid ID", "path": "budgetId", "location": "params" } ] }
//! ```
//!
//! Every other client error carries a single message:
//!
//! ```json
//! { "error": "Budget not found" }
//! ```
//!
//! Internal failures (database, hashing, session signing, mail) are logged and
//! reported as `{"error": "Internal server error"}` with status 500.
//!
//! # Example
//!
//! ```rust,no_run
//! use cashtracker::backend::error::BackendError;
//!
//! fn find() -> Result<(), BackendError> {
//!     Err(BackendError::not_found("Budget not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, INTERNAL_ERROR_MESSAGE, RATE_LIMIT_MESSAGE};
