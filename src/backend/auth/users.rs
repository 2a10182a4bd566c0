/**
 * User Model and Database Operations
 *
 * This module is the credential store: user rows, their one-time tokens
 * and confirmation state.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, name, email, password_hash, token, confirmed, created_at, updated_at";

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Pending 6-digit confirmation or reset token
    pub token: Option<String>,
    /// Set once the account has been confirmed; never unset
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for a new, unconfirmed user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub token: String,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - Name, email, password hash and confirmation token
///
/// # Returns
/// Created user or error. A duplicate email surfaces as a unique
/// constraint violation from the database.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (name, email, password_hash, token, confirmed, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.token)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get the user holding a pending token
pub async fn get_user_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE token = ?"))
        .bind(token)
        .fetch_optional(pool)
        .await
}

/// Confirm the account holding `token` and consume the token in one write
///
/// Returns the confirmed user's id, or `None` when no account holds the
/// token. A token can only be redeemed once even under concurrent requests.
pub async fn confirm_user_by_token(pool: &SqlitePool, token: &str) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("UPDATE users SET confirmed = 1, token = NULL, updated_at = ? WHERE token = ? RETURNING id")
        .bind(Utc::now())
        .bind(token)
        .fetch_optional(pool)
        .await
}

/// Replace the user's pending token
pub async fn set_user_token(pool: &SqlitePool, id: i64, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET token = ?, updated_at = ? WHERE id = ?")
        .bind(token)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Store a new password hash
///
/// With `clear_token` set the pending token is consumed in the same write,
/// which is what a token-based reset needs.
pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    password_hash: &str,
    clear_token: bool,
) -> Result<(), sqlx::Error> {
    let sql = if clear_token {
        "UPDATE users SET password_hash = ?, token = NULL, updated_at = ? WHERE id = ?"
    } else {
        "UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?"
    };

    sqlx::query(sql)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Update name and email
pub async fn update_profile(pool: &SqlitePool, id: i64, name: &str, email: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET name = ?, email = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Whether a database error is a unique constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::connect_in_memory;

    fn new_user(email: &str, token: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholderplace".to_string(),
            token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let pool = connect_in_memory().await.unwrap();
        let user = create_user(&pool, new_user("test@example.com", "123456")).await.unwrap();

        assert!(!user.confirmed);
        assert_eq!(user.token.as_deref(), Some("123456"));

        let by_email = get_user_by_email(&pool, "test@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        let by_token = get_user_by_token(&pool, "123456").await.unwrap().unwrap();
        assert_eq!(by_token.id, user.id);
        assert!(get_user_by_id(&pool, user.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let pool = connect_in_memory().await.unwrap();
        create_user(&pool, new_user("dup@example.com", "111111")).await.unwrap();
        let err = create_user(&pool, new_user("dup@example.com", "222222")).await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_confirm_consumes_token() {
        let pool = connect_in_memory().await.unwrap();
        let user = create_user(&pool, new_user("c@example.com", "654321")).await.unwrap();

        assert_eq!(confirm_user_by_token(&pool, "654321").await.unwrap(), Some(user.id));

        let user = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(user.confirmed);
        assert!(user.token.is_none());
        assert!(get_user_by_token(&pool, "654321").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_confirms_only_once() {
        let pool = connect_in_memory().await.unwrap();
        let user = create_user(&pool, new_user("once@example.com", "111222")).await.unwrap();
        let other = create_user(&pool, new_user("other@example.com", "333444")).await.unwrap();

        assert_eq!(confirm_user_by_token(&pool, "111222").await.unwrap(), Some(user.id));
        assert_eq!(confirm_user_by_token(&pool, "111222").await.unwrap(), None);
        assert_eq!(confirm_user_by_token(&pool, "999999").await.unwrap(), None);

        let other = get_user_by_id(&pool, other.id).await.unwrap().unwrap();
        assert!(!other.confirmed);
        assert_eq!(other.token.as_deref(), Some("333444"));
    }

    #[tokio::test]
    async fn test_set_user_token_replaces_pending_token() {
        let pool = connect_in_memory().await.unwrap();
        let user = create_user(&pool, new_user("t@example.com", "555555")).await.unwrap();

        set_user_token(&pool, user.id, "666666").await.unwrap();

        assert!(get_user_by_token(&pool, "555555").await.unwrap().is_none());
        let holder = get_user_by_token(&pool, "666666").await.unwrap().unwrap();
        assert_eq!(holder.id, user.id);
    }

    #[tokio::test]
    async fn test_update_password_and_profile() {
        let pool = connect_in_memory().await.unwrap();
        let user = create_user(&pool, new_user("p@example.com", "999999")).await.unwrap();

        update_password(&pool, user.id, "new-hash", false).await.unwrap();
        let reloaded = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "new-hash");
        assert_eq!(reloaded.token.as_deref(), Some("999999"));

        update_password(&pool, user.id, "newer-hash", true).await.unwrap();
        let reloaded = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(reloaded.token.is_none());

        let updated = update_profile(&pool, user.id, "Renamed", "renamed@example.com").await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "renamed@example.com");
    }
}
