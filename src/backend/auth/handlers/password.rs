/**
 * Password Handlers
 *
 * Token-based reset for signed-out users and password changes for
 * signed-in users.
 *
 * # Reset Flow
 *
 * 1. POST /api/auth/forgot-password issues a fresh token and emails it
 * 2. POST /api/auth/validate-token checks the token without consuming it
 * 3. POST /api/auth/reset-password/{token} sets the password and consumes it
 */

use axum::{
    extract::{Path, State},
    Json,
};

use crate::backend::auth::handlers::types::{CheckPasswordRequest, EmailRequest, ResetPasswordRequest, TokenRequest, UpdatePasswordRequest};
use crate::backend::auth::passwords::{hash_password, verify_password};
use crate::backend::auth::tokens::issue_unique_token;
use crate::backend::auth::users::{get_user_by_email, get_user_by_id, get_user_by_token, set_user_token, update_password as store_password, User};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::mail::AuthEmail;
use crate::backend::middleware::auth::{AuthUser, INVALID_TOKEN};
use crate::backend::server::state::AppState;

pub const PASSWORD_UPDATED: &str = "Password updated successfully";
pub const WRONG_CURRENT_PASSWORD: &str = "Current password is incorrect";

/// Forgot password handler
///
/// Replaces any pending token with a new one and emails it.
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EmailRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate()?;

    let user = get_user_by_email(&state.db_pool, request.email()).await?.ok_or_else(|| {
        tracing::warn!("Password reset for unknown email: {}", request.email());
        BackendError::not_found("User does not exist")
    })?;

    let token = issue_unique_token(&state.db_pool).await?;
    set_user_token(&state.db_pool, user.id, &token).await?;

    let email = AuthEmail {
        name: &user.name,
        email: &user.email,
        token: &token,
    }
    .password_reset(&state.config.frontend_url);
    state.mailer.send(email).await?;

    tracing::info!("Password reset token issued for user {}", user.id);
    Ok(Json("We have sent you an email with instructions"))
}

/// Validate token handler
pub async fn validate_token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate_reset()?;

    if get_user_by_token(&state.db_pool, request.token()).await?.is_none() {
        tracing::warn!("Reset token not found");
        return Err(BackendError::not_found(INVALID_TOKEN));
    }

    Ok(Json("Token is valid, proceed to reset password"))
}

/// Reset password handler
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ApiJson(request): ApiJson<ResetPasswordRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate(&token)?;

    let user = get_user_by_token(&state.db_pool, &token).await?.ok_or_else(|| {
        tracing::warn!("Password reset with unknown token");
        BackendError::not_found(INVALID_TOKEN)
    })?;

    let password_hash = hash_password(request.password(), state.config.bcrypt_cost).await?;
    store_password(&state.db_pool, user.id, &password_hash, true).await?;

    tracing::info!("Password reset for user {}", user.id);
    Ok(Json(PASSWORD_UPDATED))
}

/// Reload the signed-in user with credentials
async fn current_user(state: &AppState, user_id: i64) -> Result<User, BackendError> {
    get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized(INVALID_TOKEN))
}

/// Update password handler
pub async fn update_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate()?;

    let user = current_user(&state, auth.id).await?;
    if !verify_password(request.current_password(), &user.password_hash).await? {
        tracing::warn!("Wrong current password for user {}", user.id);
        return Err(BackendError::unauthorized(WRONG_CURRENT_PASSWORD));
    }

    let password_hash = hash_password(request.password(), state.config.bcrypt_cost).await?;
    store_password(&state.db_pool, user.id, &password_hash, false).await?;

    tracing::info!("Password changed for user {}", user.id);
    Ok(Json(PASSWORD_UPDATED))
}

/// Check password handler
pub async fn check_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<CheckPasswordRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate()?;

    let user = current_user(&state, auth.id).await?;
    if !verify_password(request.password(), &user.password_hash).await? {
        return Err(BackendError::unauthorized(WRONG_CURRENT_PASSWORD));
    }

    Ok(Json("Password is correct"))
}
