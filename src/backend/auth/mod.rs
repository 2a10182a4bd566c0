//! Authentication Module
//!
//! This module handles registration, account confirmation, login, password
//! management and session tokens.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User model and database operations
//! - **`sessions`** - JWT generation and validation
//! - **`tokens`** - 6-digit one-time tokens for confirmation and reset
//! - **`passwords`** - bcrypt hashing off the async workers
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── tokens.rs       - One-time tokens
//! ├── passwords.rs    - Password hashing
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Create account**: user is stored unconfirmed and a token is emailed
//! 2. **Confirm**: the token is consumed and the account becomes confirmed
//! 3. **Login**: confirmed users exchange email and password for a JWT
//! 4. **Authenticated calls**: `Authorization: Bearer <jwt>`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Session tokens are HS256 JWTs, 30 days by default
//! - A user holds at most one pending one-time token

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// One-time confirmation and reset tokens
pub mod tokens;

/// Password hashing
pub mod passwords;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{
    check_password, confirm_account, create_account, forgot_password, get_user, login, reset_password,
    update_password, update_profile, validate_token,
};
