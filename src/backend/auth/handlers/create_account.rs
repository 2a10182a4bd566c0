/**
 * Account Registration Handlers
 *
 * POST /api/auth/create-account and POST /api/auth/confirm-account.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Reject an email that is already registered (409)
 * 3. Hash the password and issue a 6-digit confirmation token
 * 4. Store the unconfirmed user and email the token
 *
 * Confirmation consumes the token, so a second attempt with the same token
 * fails with 401.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{CreateAccountRequest, TokenRequest};
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::tokens::issue_unique_token;
use crate::backend::auth::users::{confirm_user_by_token, create_user, get_user_by_email, is_unique_violation, NewUser};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::mail::AuthEmail;
use crate::backend::server::state::AppState;

pub const EMAIL_TAKEN: &str = "A user with this email already exists";

/// Create account handler
///
/// # Errors
///
/// * `400 Bad Request` - Field validation failed
/// * `409 Conflict` - Email already registered
/// * `500 Internal Server Error` - Database, hashing or mail failure
pub async fn create_account(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<&'static str>), BackendError> {
    request.validate()?;

    if get_user_by_email(&state.db_pool, request.email()).await?.is_some() {
        tracing::warn!("Signup attempt for registered email: {}", request.email());
        return Err(BackendError::conflict(EMAIL_TAKEN));
    }

    let password_hash = hash_password(request.password(), state.config.bcrypt_cost).await?;
    let token = issue_unique_token(&state.db_pool).await?;

    let user = create_user(
        &state.db_pool,
        NewUser {
            name: request.name().to_string(),
            email: request.email().to_string(),
            password_hash,
            token,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::conflict(EMAIL_TAKEN)
        } else {
            BackendError::from(e)
        }
    })?;

    let pending_token = user.token.as_deref().unwrap_or_default();
    let email = AuthEmail {
        name: &user.name,
        email: &user.email,
        token: pending_token,
    }
    .confirmation(&state.config.frontend_url);
    state.mailer.send(email).await?;

    tracing::info!("User created: {} ({})", user.id, user.email);
    Ok((StatusCode::CREATED, Json("User created successfully")))
}

/// Confirm account handler
///
/// # Errors
///
/// * `400 Bad Request` - Token is not 6 characters
/// * `401 Unauthorized` - No user holds the token
pub async fn confirm_account(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate_confirmation()?;

    let user_id = confirm_user_by_token(&state.db_pool, request.token()).await?.ok_or_else(|| {
        tracing::warn!("Confirmation with unknown token");
        BackendError::unauthorized("Invalid token")
    })?;

    tracing::info!("Account confirmed: {}", user_id);
    Ok(Json("Account confirmed successfully"))
}
