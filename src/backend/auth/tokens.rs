//! One-time account tokens
//!
//! Six-digit numeric codes sent by email for account confirmation and
//! password reset. A user holds at most one pending token; issuing a new one
//! replaces it and a successful confirmation or reset consumes it.

use rand::Rng;
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_token;
use crate::backend::error::BackendError;

/// Length of every one-time token
pub const TOKEN_LENGTH: usize = 6;

const MAX_ISSUE_ATTEMPTS: usize = 10;

/// Generate a random 6-digit token (`100000..=999999`)
pub fn generate_token() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

/// Whether `token` has the shape of an issued token
pub fn is_token_format(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_digit())
}

/// Generate a token that no other user currently holds
///
/// Lookups are by token alone, so two live copies would make confirmation
/// ambiguous.
pub async fn issue_unique_token(pool: &SqlitePool) -> Result<String, BackendError> {
    for _ in 0..MAX_ISSUE_ATTEMPTS {
        let token = generate_token();
        if get_user_by_token(pool, &token).await?.is_none() {
            return Ok(token);
        }
        tracing::debug!("Generated token already pending, retrying");
    }
    Err(BackendError::internal("Could not generate an unused token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_in_memory;

    #[test]
    fn test_generated_tokens_are_six_digits() {
        for _ in 0..200 {
            let token = generate_token();
            assert!(is_token_format(&token), "bad token {token}");
            assert_ne!(token.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn test_token_format() {
        assert!(is_token_format("123456"));
        assert!(!is_token_format("12345"));
        assert!(!is_token_format("1234567"));
        assert!(!is_token_format("12a456"));
    }

    #[tokio::test]
    async fn test_issue_unique_token() {
        let pool = connect_in_memory().await.unwrap();
        let token = issue_unique_token(&pool).await.unwrap();
        assert!(is_token_format(&token));
    }
}
