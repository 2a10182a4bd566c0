/**
 * Current User Handlers
 *
 * GET /api/auth/user returns the authenticated user and
 * PUT /api/auth/update-profile changes their name and email.
 */

use axum::{extract::State, Json};

use crate::backend::auth::handlers::create_account::EMAIL_TAKEN;
use crate::backend::auth::handlers::types::UpdateProfileRequest;
use crate::backend::auth::users::{get_user_by_email, is_unique_violation, update_profile as store_profile};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::auth::{AuthUser, AuthenticatedUser};
use crate::backend::server::state::AppState;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// { "id": 1, "name": "Juan", "email": "juan@example.com" }
/// ```
pub async fn get_user(AuthUser(user): AuthUser) -> Json<AuthenticatedUser> {
    Json(user)
}

/// Update profile handler
///
/// # Errors
///
/// * `400 Bad Request` - Empty name or invalid email
/// * `409 Conflict` - Email belongs to another user
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<&'static str>, BackendError> {
    request.validate()?;

    if let Some(existing) = get_user_by_email(&state.db_pool, request.email()).await? {
        if existing.id != user.id {
            tracing::warn!("User {} tried to take email of user {}", user.id, existing.id);
            return Err(BackendError::conflict(EMAIL_TAKEN));
        }
    }

    store_profile(&state.db_pool, user.id, request.name(), request.email())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::conflict(EMAIL_TAKEN)
            } else {
                BackendError::from(e)
            }
        })?;

    tracing::info!("Profile updated for user {}", user.id);
    Ok(Json("Profile updated successfully"))
}
