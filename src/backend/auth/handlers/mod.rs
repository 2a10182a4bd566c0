//! Authentication Handlers
//!
//! HTTP handlers for `/api/auth/*`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs             - Handler exports
//! ├── types.rs           - Request types and field rules
//! ├── create_account.rs  - Registration and confirmation
//! ├── login.rs           - Session token issuance
//! ├── password.rs        - Reset, change and check password
//! └── me.rs              - Current user and profile update
//! ```

pub mod create_account;
pub mod login;
pub mod me;
pub mod password;
pub mod types;

pub use create_account::{confirm_account, create_account};
pub use login::login;
pub use me::{get_user, update_profile};
pub use password::{check_password, forgot_password, reset_password, update_password, validate_token};
