//! Shared Error Types
//!
//! Errors raised by the finance types before any server code is involved.
//! The backend wraps them in `BackendError` and turns them into HTTP responses.
//!
//! - `ValidationError` - One or more field-level violations
//! - `AmountError` - A stored monetary amount could not be parsed
//!
//! ```rust
//! use cashtracker::shared::error::SharedError;
//! use cashtracker::shared::validation::FieldLocation;
//!
//! let error = SharedError::validation("name", FieldLocation::Body, "Budget name is required");
//! assert_eq!(error.field_errors().len(), 1);
//! ```

use thiserror::Error;

use crate::shared::validation::{FieldError, FieldLocation};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Every violation found in a request, in rule order
    #[error("Validation failed with {} error(s)", .errors.len())]
    ValidationError { errors: Vec<FieldError> },

    /// A stored amount is not a valid decimal
    #[error("Invalid stored amount: {message}")]
    AmountError { message: String },
}

impl SharedError {
    /// A validation error with a single violation
    pub fn validation(path: impl Into<String>, location: FieldLocation, msg: impl Into<String>) -> Self {
        Self::ValidationError {
            errors: vec![FieldError::new(path, location, msg)],
        }
    }

    pub fn from_field_errors(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }

    pub fn amount(message: impl Into<String>) -> Self {
        Self::AmountError {
            message: message.into(),
        }
    }

    /// Field violations carried by this error (empty for amount errors)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::ValidationError { errors } => errors,
            Self::AmountError { .. } => &[],
        }
    }
}
