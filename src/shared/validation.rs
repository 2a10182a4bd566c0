//! Field-level request validation
//!
//! Validation collects every violation before failing so that a client sees
//! all problems with a request in one response. Each violation is reported as
//! a [`FieldError`] in the `errors` array of a 400 response:
//!
//! ```json
//! {
//!   "errors": [
//!     { "type": "field", "msg": "Invalid email address", "path": "email", "location": "body" }
//!   ]
//! }
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cashtracker::shared::validation::{FieldLocation, Validator};
//!
//! let mut validator = Validator::new(FieldLocation::Body);
//! validator.non_empty("name", "", "Name is required");
//! validator.email("email", "not-an-email", "Invalid email address");
//! let errors = validator.finish().unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Where a validated value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    /// JSON request body
    Body,
    /// URL path parameter
    Params,
}

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message
    pub msg: String,
    /// Name of the offending field or path parameter
    pub path: String,
    /// Where the field was read from
    pub location: FieldLocation,
}

impl FieldError {
    pub fn new(path: impl Into<String>, location: FieldLocation, msg: impl Into<String>) -> Self {
        Self {
            kind: "field".to_string(),
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }
}

/// Accumulates violations for one request
#[derive(Debug)]
pub struct Validator {
    location: FieldLocation,
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new(location: FieldLocation) -> Self {
        Self {
            location,
            errors: Vec::new(),
        }
    }

    /// Record a violation unconditionally
    pub fn push(&mut self, path: &str, msg: &str) {
        self.errors.push(FieldError::new(path, self.location, msg));
    }

    /// Require a value with at least one non-whitespace character
    pub fn non_empty(&mut self, path: &str, value: &str, msg: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(path, msg);
        }
        self
    }

    /// Require a value of at least `min` characters
    pub fn min_len(&mut self, path: &str, value: &str, min: usize, msg: &str) -> &mut Self {
        if value.chars().count() < min {
            self.push(path, msg);
        }
        self
    }

    /// Require a value of exactly `len` characters
    pub fn exact_len(&mut self, path: &str, value: &str, len: usize, msg: &str) -> &mut Self {
        if value.chars().count() != len {
            self.push(path, msg);
        }
        self
    }

    /// Require a plausible email address
    pub fn email(&mut self, path: &str, value: &str, msg: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.push(path, msg);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Return the collected violations, if any
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Like [`Validator::finish`], wrapped into a [`SharedError`]
    pub fn into_result(self) -> Result<(), SharedError> {
        self.finish().map_err(SharedError::from_field_errors)
    }
}

/// Check an email address
///
/// Accepts `local@domain.tld` where the local part and every domain label are
/// non-empty, nothing contains whitespace, and the top-level label has at
/// least two characters.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return false;
    }

    labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false)
}
