//! In-memory mail delivery
//!
//! `RecordingMailer` keeps every sent email so tests can read back the
//! one-time tokens a real user would receive by email.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::error::BackendError;
use crate::backend::mail::{Mailer, OutgoingEmail};
use crate::backend::auth::tokens::is_token_format;

/// Stores sent emails instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    outbox: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every email sent so far, oldest first
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().map(|outbox| outbox.clone()).unwrap_or_default()
    }

    /// Most recent email sent to `address`
    pub fn last_to(&self, address: &str) -> Option<OutgoingEmail> {
        self.sent().into_iter().rev().find(|email| email.to == address)
    }

    /// Token carried by the most recent email sent to `address`
    pub fn token_for(&self, address: &str) -> Option<String> {
        self.last_to(address).and_then(|email| extract_token(&email.html))
    }
}

/// Find the 6-digit token in an account email body
///
/// Tokens are the last `<strong>` element holding exactly six digits.
pub fn extract_token(html: &str) -> Option<String> {
    html.split("<strong>")
        .skip(1)
        .filter_map(|segment| segment.split("</strong>").next())
        .filter(|text| is_token_format(text))
        .last()
        .map(str::to_string)
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), BackendError> {
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| BackendError::mail("Outbox lock poisoned"))?;
        outbox.push(email);
        Ok(())
    }
}
