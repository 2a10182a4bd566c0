//! JSON body extraction
//!
//! `ApiJson` replaces `axum::Json` as the body extractor so every rejection
//! is a `BackendError` with a JSON body. A request without a JSON body is
//! read as `{}`, which lets field validation report what is missing.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

fn is_json_content_type(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(&req);
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Failed to read request body: {}", rejection);
            BackendError::bad_request("Failed to read request body")
        })?;

        let body: &[u8] = if is_json && !bytes.iter().all(u8::is_ascii_whitespace) {
            &bytes
        } else {
            b"{}"
        };

        serde_json::from_slice(body).map(ApiJson).map_err(|e| {
            tracing::warn!("Rejected JSON body: {}", e);
            BackendError::bad_request(format!("Invalid JSON body: {}", e))
        })
    }
}
