/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Require a confirmed account
 * 3. Verify password using bcrypt
 * 4. Return a signed session token
 *
 * The response body is the bare JWT as a JSON string.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::LoginRequest;
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid email or empty password
/// * `404 Not Found` - No user with this email
/// * `403 Forbidden` - Account not confirmed yet
/// * `401 Unauthorized` - Password does not match
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<String>, BackendError> {
    request.validate()?;
    tracing::info!("Login request for: {}", request.email());

    let user = get_user_by_email(&state.db_pool, request.email()).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", request.email());
        BackendError::not_found("User does not exist")
    })?;

    if !user.confirmed {
        tracing::warn!("Login for unconfirmed account: {}", user.id);
        return Err(BackendError::forbidden(StatusCode::FORBIDDEN, "Account not confirmed"));
    }

    if !verify_password(request.password(), &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::unauthorized("Incorrect password"));
    }

    let token = create_token(user.id, &state.config.jwt_secret, state.config.jwt_ttl)?;

    tracing::info!("User logged in successfully: {}", user.id);
    Ok(Json(token))
}
