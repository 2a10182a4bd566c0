//! Password hashing
//!
//! bcrypt runs on the blocking pool so a high cost factor does not stall the
//! async workers.

use crate::backend::error::BackendError;

/// Hash a plaintext password with the given bcrypt cost
pub async fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("Hashing task failed: {}", e)))?
        .map_err(BackendError::from)
}

/// Check a plaintext password against a stored hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, BackendError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("Verification task failed: {}", e)))?
        .map_err(BackendError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("password123", 4).await.unwrap();
        assert_ne!(hash, "password123");
        assert!(verify_password("password123", &hash).await.unwrap());
        assert!(!verify_password("wrong-password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(verify_password("password123", "not-a-bcrypt-hash").await.is_err());
    }
}
