//! Mail Module
//!
//! Outgoing email for account confirmation and password reset.
//!
//! # Architecture
//!
//! - **`Mailer`** - Async delivery trait held in `AppState` as `Arc<dyn Mailer>`
//! - **`smtp`** - `SmtpMailer` (lettre) and `LogMailer` for unconfigured hosts
//! - **`recording`** - `RecordingMailer`, an in-memory outbox for tests
//! - **`AuthEmail`** - Builds the two account emails
//!
//! # Module Structure
//!
//! ```text
//! mail/
//! ├── mod.rs        - Mailer trait, OutgoingEmail, AuthEmail
//! ├── smtp.rs       - SMTP and log-only delivery
//! └── recording.rs  - In-memory delivery
//! ```

pub mod recording;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::error::BackendError;
use crate::shared::config::AppConfig;

pub use recording::RecordingMailer;
pub use smtp::{LogMailer, SmtpMailer};

/// Sender shown on every outgoing email
pub const FROM_ADDRESS: &str = "CashTracker <admin@cashtracker.com>";

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Email delivery
///
/// Implementations must be cheap to share across requests.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), BackendError>;
}

/// Recipient details for an account email
#[derive(Debug, Clone, Copy)]
pub struct AuthEmail<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub token: &'a str,
}

impl AuthEmail<'_> {
    /// Email asking the user to confirm a new account
    pub fn confirmation(&self, frontend_url: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: FROM_ADDRESS.to_string(),
            to: self.email.to_string(),
            subject: "Confirm your account on CashTracker".to_string(),
            html: format!(
                "<p>Hello <strong>{}</strong>, please confirm your account on CashTracker using this token: <strong>{}</strong></p>\n\
                 <a href=\"{}/auth/confirm-account\">Confirm Account</a>\n",
                escape_html(self.name),
                self.token,
                frontend_url
            ),
        }
    }

    /// Email carrying a password reset token
    pub fn password_reset(&self, frontend_url: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: FROM_ADDRESS.to_string(),
            to: self.email.to_string(),
            subject: "Reset your password on CashTracker".to_string(),
            html: format!(
                "<p>Hello <strong>{}</strong>, you have requested to reset your password on CashTracker. \
                 Use this token to reset it: <strong>{}</strong></p>\n\
                 <a href=\"{}/auth/new-password\">Reset Password</a>\n",
                escape_html(self.name),
                self.token,
                frontend_url
            ),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Pick the mailer for a configuration
///
/// SMTP when `SMTP_HOST` is configured, otherwise emails are only logged.
pub fn mailer_from_config(config: &AppConfig) -> Result<Arc<dyn Mailer>, BackendError> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!("Sending email through SMTP relay {}:{}", smtp.host, smtp.port);
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
        None => {
            tracing::warn!("SMTP not configured. Outgoing emails will only be logged.");
            Ok(Arc::new(LogMailer))
        }
    }
}
