/**
 * Backend Error Types
 *
 * This module defines `BackendError`, the error returned by handlers,
 * extractors and middleware.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - One or more field violations (400)
 * - `BadRequest` - Unreadable request body (400)
 * - `Unauthorized` - Missing or invalid credentials (401)
 * - `Forbidden` - Authenticated but not allowed (401 or 403)
 * - `NotFound` - Resource or token does not exist (404)
 * - `Conflict` - Uniqueness violation (409)
 * - `RateLimited` - Too many requests from one address (429)
 *
 * ## Internal Errors
 *
 * `Database`, `Hashing`, `Session`, `Mail` and `Internal` all map to 500.
 * Their details are logged and never sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::validation::{FieldError, FieldLocation};

/// Body message for every 500 response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body message for 429 responses
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again after 10 minutes.";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use cashtracker::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::forbidden(StatusCode::FORBIDDEN, "Invalid Action");
/// assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Field-level validation failure
    #[error("Validation failed with {} error(s)", .errors.len())]
    Validation {
        /// Every violation found in the request
        errors: Vec<FieldError>,
    },

    /// The request body could not be read as JSON
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing, malformed or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The caller is known but may not perform the action
    ///
    /// Budget ownership mismatches answer 401, expense/budget mismatches 403.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// HTTP status code for this error
        status: StatusCode,
        message: String,
    },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("Mail error: {message}")]
    Mail { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    /// Create a validation error with a single violation
    ///
    /// # Arguments
    ///
    /// * `path` - Offending field or path parameter
    /// * `location` - Where the value was read from
    /// * `msg` - Human-readable message
    pub fn validation(path: impl Into<String>, location: FieldLocation, msg: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(path, location, msg)],
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a forbidden error with an explicit status code
    pub fn forbidden(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Forbidden {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Hashing(_) | Self::Session(_) | Self::Mail { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this error hides an internal cause from the client
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get the client-facing error message
    ///
    /// Internal errors always return [`INTERNAL_ERROR_MESSAGE`].
    pub fn message(&self) -> String {
        match self {
            Self::Validation { .. } => self.to_string(),
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::RateLimited => RATE_LIMIT_MESSAGE.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validation_error() {
        let error = BackendError::validation("budgetId", FieldLocation::Params, "Invalid ID");
        assert_matches!(&error, BackendError::Validation { errors } if errors.len() == 1);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::unauthorized("Not authorized").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            BackendError::forbidden(StatusCode::UNAUTHORIZED, "Access denied").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::forbidden(StatusCode::FORBIDDEN, "Invalid Action").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(BackendError::not_found("Budget not found").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("taken").status_code(), StatusCode::CONFLICT);
        assert_eq!(BackendError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(BackendError::Database(sqlx::Error::RowNotFound).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(BackendError::mail("relay down").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = BackendError::internal("connection string was postgres://secret");
        assert!(error.is_internal());
        assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
        assert!(error.to_string().contains("secret"));
    }

    #[test]
    fn test_client_messages_pass_through() {
        assert_eq!(BackendError::not_found("Expense not found").message(), "Expense not found");
        assert_eq!(BackendError::RateLimited.message(), RATE_LIMIT_MESSAGE);
    }
}
