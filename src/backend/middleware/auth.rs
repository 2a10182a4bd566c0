/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the JWT from the
 * Authorization header, loads the user and hands it to handlers.
 *
 * # Rejections
 *
 * - No `Authorization` header, or not `Bearer <token>` → 401 "Not authorized"
 * - Bad signature, expired token or unknown user → 401 "Invalid token"
 *
 * The database is only touched after the token itself verifies.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const NOT_AUTHORIZED: &str = "Not authorized";
pub const INVALID_TOKEN: &str = "Invalid token";

/// Authenticated user loaded for the current request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized(NOT_AUTHORIZED)
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized(NOT_AUTHORIZED)
        })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT from the Authorization header
/// 2. Verifies signature and expiry
/// 3. Loads the user named by the `sub` claim
/// 4. Attaches the user to request extensions for handlers
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;

    let claims = verify_token(token, &app_state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized(INVALID_TOKEN)
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {:?}", claims.sub);
        BackendError::unauthorized(INVALID_TOKEN)
    })?;

    let user = get_user_by_id(&app_state.db_pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user {}", user_id);
        BackendError::unauthorized(INVALID_TOKEN)
    })?;

    request.extensions_mut().insert(AuthenticatedUser::from(&user));

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// Only valid on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

/// Read the user the middleware attached
pub fn authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, BackendError> {
    parts.extensions.get::<AuthenticatedUser>().cloned().ok_or_else(|| {
        tracing::warn!("AuthenticatedUser not found in request extensions");
        BackendError::unauthorized(NOT_AUTHORIZED)
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticated_user(parts).map(AuthUser)
    }
}
