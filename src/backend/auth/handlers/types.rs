/**
 * Authentication Request Types
 *
 * Request bodies for the auth endpoints and their field rules. Every field
 * is optional and accepts any JSON value at the serde level, so a missing or
 * mistyped value is reported as a validation error rather than a parse
 * failure.
 */

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::backend::auth::tokens::TOKEN_LENGTH;
use crate::shared::validation::{FieldError, FieldLocation, Validator};
use crate::shared::SharedError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Accept any JSON value; non-strings are kept as their JSON text
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Create account request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateAccountRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator
            .non_empty("name", text(&self.name), "Name is required")
            .min_len(
                "password",
                text(&self.password),
                MIN_PASSWORD_LENGTH,
                "Password must be at least 8 characters long",
            )
            .email("email", text(&self.email), "Invalid email address");
        validator.into_result()
    }

    pub fn name(&self) -> &str {
        text(&self.name).trim()
    }

    pub fn email(&self) -> &str {
        text(&self.email)
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }
}

/// Body carrying a one-time token
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TokenRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub token: Option<String>,
}

impl TokenRequest {
    pub fn token(&self) -> &str {
        text(&self.token)
    }

    /// Rules for account confirmation
    pub fn validate_confirmation(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator.exact_len("token", self.token(), TOKEN_LENGTH, "Invalid token format");
        validator.into_result()
    }

    /// Rules for password-reset token checks
    pub fn validate_reset(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        token_rules(&mut validator, self.token());
        validator.into_result()
    }
}

fn token_rules(validator: &mut Validator, token: &str) {
    validator
        .non_empty("token", token, "Token is required")
        .exact_len("token", token, TOKEN_LENGTH, "Token must be 6 characters long");
}

/// Login request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator
            .email("email", self.email(), "Invalid email address")
            .non_empty("password", self.password(), "Password is required");
        validator.into_result()
    }

    pub fn email(&self) -> &str {
        text(&self.email)
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }
}

/// Forgot password request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EmailRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
}

impl EmailRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator.email("email", self.email(), "Invalid email address");
        validator.into_result()
    }

    pub fn email(&self) -> &str {
        text(&self.email)
    }
}

/// Reset password request; the token comes from the path
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ResetPasswordRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

impl ResetPasswordRequest {
    /// Validate the path token and the body together
    pub fn validate(&self, token: &str) -> Result<(), SharedError> {
        let mut params = Validator::new(FieldLocation::Params);
        token_rules(&mut params, token);

        let mut body = Validator::new(FieldLocation::Body);
        body.min_len(
            "password",
            self.password(),
            MIN_PASSWORD_LENGTH,
            "Password must be at least 8 characters long",
        );

        let errors: Vec<FieldError> = [params.finish(), body.finish()]
            .into_iter()
            .filter_map(Result::err)
            .flatten()
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SharedError::from_field_errors(errors))
        }
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }
}

/// Change password request for a signed-in user
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePasswordRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub current_password: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

impl UpdatePasswordRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator
            .non_empty("current_password", self.current_password(), "Current password is required")
            .min_len(
                "password",
                self.password(),
                MIN_PASSWORD_LENGTH,
                "New password must be at least 8 characters long",
            );
        validator.into_result()
    }

    pub fn current_password(&self) -> &str {
        text(&self.current_password)
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }
}

/// Password confirmation for a signed-in user
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CheckPasswordRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub password: Option<String>,
}

impl CheckPasswordRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator.non_empty("password", self.password(), "Current password is required");
        validator.into_result()
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }
}

/// Profile update request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut validator = Validator::new(FieldLocation::Body);
        validator
            .non_empty("name", text(&self.name), "Name is required")
            .email("email", self.email(), "Invalid email address");
        validator.into_result()
    }

    pub fn name(&self) -> &str {
        text(&self.name).trim()
    }

    pub fn email(&self) -> &str {
        text(&self.email)
    }
}
