/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError` plus `From` implementations for the
 * errors of crates the backend calls into.
 *
 * # Response Format
 *
 * ```json
 * { "error": "Error message" }
 * ```
 *
 * or, for validation failures:
 *
 * ```json
 * { "errors": [ { "type": "field", "msg": "...", "path": "...", "location": "body" } ] }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;
use crate::shared::SharedError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status.as_u16(), self);
        }

        let body = match self {
            BackendError::Validation { errors } => json!({ "errors": errors }),
            other => json!({ "error": other.message() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { errors } => Self::Validation { errors },
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<lettre::error::Error> for BackendError {
    fn from(err: lettre::error::Error) -> Self {
        Self::mail(format!("Failed to build email: {}", err))
    }
}

impl From<lettre::address::AddressError> for BackendError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::mail(format!("Invalid email address: {}", err))
    }
}

impl From<lettre::transport::smtp::Error> for BackendError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::mail(format!("SMTP delivery failed: {}", err))
    }
}
