/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * Tokens are signed with HS256 using `AppConfig::jwt_secret` and carry the
 * user id in `sub`.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    /// User id carried in `sub`, if it is a positive integer
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok().filter(|id| *id > 0)
    }
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `user_id` - User ID
/// * `secret` - HMAC signing secret
/// * `ttl` - Token lifetime
///
/// # Returns
/// JWT token string, or an internal error when `now + ttl` is not a
/// representable time
pub fn create_token(user_id: i64, secret: &str, ttl: Duration) -> Result<String, BackendError> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| BackendError::internal(format!("Session lifetime out of range: {} days", ttl.num_days())))?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expires_at.timestamp().max(0) as u64,
        iat: now.timestamp().max(0) as u64,
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?)
}

/// Verify and decode a JWT token
///
/// Fails on a bad signature, an expired token or malformed claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}
