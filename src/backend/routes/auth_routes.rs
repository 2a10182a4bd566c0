/**
 * Authentication Routes
 *
 * ## Public
 * - `POST /api/auth/create-account`
 * - `POST /api/auth/confirm-account`
 * - `POST /api/auth/login`
 * - `POST /api/auth/forgot-password`
 * - `POST /api/auth/validate-token`
 * - `POST /api/auth/reset-password/{token}`
 *
 * ## Bearer token required
 * - `GET /api/auth/user`
 * - `POST /api/auth/update-password`
 * - `POST /api/auth/check-password`
 * - `PUT /api/auth/update-profile`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{
    check_password, confirm_account, create_account, forgot_password, get_user, login, reset_password,
    update_password, update_profile, validate_token,
};
use crate::backend::middleware::{auth_middleware, rate_limit_middleware};
use crate::backend::server::state::AppState;

/// Configure authentication routes under `/api/auth`
pub fn configure_auth_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let account = Router::new()
        .route("/user", get(get_user))
        .route("/update-password", post(update_password))
        .route("/check-password", post(check_password))
        .route("/update-profile", put(update_profile))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let auth = Router::new()
        .route("/create-account", post(create_account))
        .route("/confirm-account", post(confirm_account))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/validate-token", post(validate_token))
        .route("/reset-password/{token}", post(reset_password))
        .merge(account)
        .route_layer(from_fn_with_state(app_state.rate_limiter.clone(), rate_limit_middleware));

    router.nest("/api/auth", auth)
}
