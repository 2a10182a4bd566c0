//! Application configuration module
//!
//! Provides configuration types for the application. Values come from the
//! process environment (the server binary loads `.env` first) or from
//! [`AppConfigBuilder`] in tests.
//!
//! # Environment Variables
//!
//! | Variable         | Default                              |
//! |------------------|--------------------------------------|
//! | `DATABASE_URL`   | `sqlite://cashtracker.db?mode=rwc`   |
//! | `JWT_SECRET`     | development secret (logged warning)  |
//! | `JWT_TTL_DAYS`   | `30`                                 |
//! | `SERVER_PORT`    | `4000`                               |
//! | `APP_ENV`        | `development`                        |
//! | `RATE_LIMIT_MAX` | `5` in production, `100` otherwise   |
//! | `BCRYPT_COST`    | `12`                                 |
//! | `FRONTEND_URL`   | `http://localhost:3000`              |
//! | `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS` | unset |

use std::str::FromStr;

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cashtracker.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_JWT_TTL_DAYS: i64 = 30;
/// Longest accepted session lifetime
pub const MAX_JWT_TTL_DAYS: i64 = 3650;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_SMTP_PORT: u16 = 587;
const DEV_JWT_SECRET: &str = "cashtracker-development-secret";

/// Deployment environment, read from `APP_ENV`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Requests per source address per rate-limit window
    pub fn default_rate_limit(self) -> u32 {
        if self.is_production() {
            5
        } else {
            100
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "dev" | "development" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: other.to_string(),
            }),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx connection string
    pub database_url: String,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub jwt_ttl: Duration,
    /// HTTP listen port
    pub port: u16,
    pub environment: Environment,
    /// Auth requests allowed per source address per window
    pub rate_limit_max: u32,
    pub bcrypt_cost: u32,
    /// Base URL used for links in outgoing emails
    pub frontend_url: String,
    /// `None` means emails are only logged
    pub smtp: Option<SmtpConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_ttl: Duration::days(DEFAULT_JWT_TTL_DAYS),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            rate_limit_max: Environment::Development.default_rate_limit(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            smtp: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Read the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = AppConfig::builder();

        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        match get("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => tracing::warn!("JWT_SECRET not set. Using the development secret."),
        }
        if let Some(days) = get("JWT_TTL_DAYS") {
            builder = builder.jwt_ttl(parse_ttl_days(&days)?);
        }
        if let Some(port) = get("SERVER_PORT") {
            builder = builder.port(parse_var("SERVER_PORT", &port)?);
        }
        if let Some(env) = get("APP_ENV") {
            builder = builder.environment(env.parse()?);
        }
        if let Some(max) = get("RATE_LIMIT_MAX") {
            builder = builder.rate_limit_max(parse_var("RATE_LIMIT_MAX", &max)?);
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }
        if let Some(url) = get("FRONTEND_URL") {
            builder = builder.frontend_url(url);
        }
        if let Some(host) = get("SMTP_HOST") {
            let port = match get("SMTP_PORT") {
                Some(port) => parse_var("SMTP_PORT", &port)?,
                None => DEFAULT_SMTP_PORT,
            };
            builder = builder.smtp(SmtpConfig {
                host,
                port,
                username: get("SMTP_USER").ok_or(ConfigError::MissingValue("SMTP_USER"))?,
                password: get("SMTP_PASS").ok_or(ConfigError::MissingValue("SMTP_PASS"))?,
            });
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.environment.is_production() && self.jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.jwt_ttl <= Duration::zero() || self.jwt_ttl > Duration::days(MAX_JWT_TTL_DAYS) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_DAYS",
                value: self.jwt_ttl.num_days().to_string(),
            });
        }
        if self.rate_limit_max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RATE_LIMIT_MAX",
                value: "0".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.frontend_url.clone()));
        }
        Ok(())
    }
}

/// `JWT_TTL_DAYS` must be within `1..=MAX_JWT_TTL_DAYS`
fn parse_ttl_days(value: &str) -> Result<Duration, ConfigError> {
    let days: i64 = parse_var("JWT_TTL_DAYS", value)?;
    if (1..=MAX_JWT_TTL_DAYS).contains(&days) {
        Ok(Duration::days(days))
    } else {
        Err(ConfigError::InvalidValue {
            key: "JWT_TTL_DAYS",
            value: value.to_string(),
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_ttl: Option<Duration>,
    port: Option<u16>,
    environment: Option<Environment>,
    rate_limit_max: Option<u32>,
    bcrypt_cost: Option<u32>,
    frontend_url: Option<String>,
    smtp: Option<SmtpConfig>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn jwt_ttl(mut self, ttl: Duration) -> Self {
        self.jwt_ttl = Some(ttl);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the environment
    ///
    /// Also picks the default rate limit unless one was set explicitly.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn rate_limit_max(mut self, max: u32) -> Self {
        self.rate_limit_max = Some(max);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = Some(url.into());
        self
    }

    pub fn smtp(mut self, smtp: SmtpConfig) -> Self {
        self.smtp = Some(smtp);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let environment = self.environment.unwrap_or(defaults.environment);
        let config = AppConfig {
            database_url: self.database_url.unwrap_or(defaults.database_url),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            jwt_ttl: self.jwt_ttl.unwrap_or(defaults.jwt_ttl),
            port: self.port.unwrap_or(defaults.port),
            environment,
            rate_limit_max: self
                .rate_limit_max
                .unwrap_or_else(|| environment.default_rate_limit()),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            frontend_url: self
                .frontend_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.frontend_url),
            smtp: self.smtp,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 4000);
        assert_eq!(config.jwt_ttl, Duration::days(30));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.rate_limit_max, 100);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert!(config.smtp.is_none());
    }

    #[test]
    fn test_production_rate_limit() {
        let config = AppConfig::from_lookup(lookup(&[("APP_ENV", "production"), ("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.rate_limit_max, 5);

        let config = AppConfig::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", "s3cret"),
            ("RATE_LIMIT_MAX", "20"),
        ]))
        .unwrap();
        assert_eq!(config.rate_limit_max, 20);
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        assert_matches!(
            AppConfig::from_lookup(lookup(&[("APP_ENV", "production")])),
            Err(ConfigError::MissingValue("JWT_SECRET"))
        );
        assert_matches!(
            AppConfig::builder().environment(Environment::Production).build(),
            Err(ConfigError::MissingValue("JWT_SECRET"))
        );

        // Development keeps working with the built-in secret
        assert!(AppConfig::from_lookup(lookup(&[("APP_ENV", "development")])).is_ok());
    }

    #[test]
    fn test_jwt_ttl_bounds() {
        let config = AppConfig::from_lookup(lookup(&[("JWT_TTL_DAYS", "3650")])).unwrap();
        assert_eq!(config.jwt_ttl, Duration::days(MAX_JWT_TTL_DAYS));

        for days in ["0", "-3", "3651", "100000000", "999999999999999"] {
            assert_matches!(
                AppConfig::from_lookup(lookup(&[("JWT_TTL_DAYS", days)])),
                Err(ConfigError::InvalidValue { key: "JWT_TTL_DAYS", .. })
            );
        }
        assert_matches!(
            AppConfig::builder().jwt_ttl(Duration::days(MAX_JWT_TTL_DAYS + 1)).build(),
            Err(ConfigError::InvalidValue { key: "JWT_TTL_DAYS", .. })
        );
    }

    #[test]
    fn test_smtp_requires_credentials() {
        let result = AppConfig::from_lookup(lookup(&[("SMTP_HOST", "smtp.example.com")]));
        assert_matches!(result, Err(ConfigError::MissingValue("SMTP_USER")));

        let config = AppConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USER", "mailer"),
            ("SMTP_PASS", "pw"),
        ]))
        .unwrap();
        assert_eq!(config.smtp.unwrap().port, 2525);
    }

    #[test]
    fn test_invalid_values() {
        assert_matches!(
            AppConfig::from_lookup(lookup(&[("SERVER_PORT", "http")])),
            Err(ConfigError::InvalidValue { key: "SERVER_PORT", .. })
        );
        assert_matches!(
            AppConfig::from_lookup(lookup(&[("APP_ENV", "staging")])),
            Err(ConfigError::InvalidValue { key: "APP_ENV", .. })
        );
        assert_matches!(
            AppConfig::builder().rate_limit_max(0).build(),
            Err(ConfigError::InvalidValue { key: "RATE_LIMIT_MAX", .. })
        );
        assert_matches!(
            AppConfig::builder().bcrypt_cost(3).build(),
            Err(ConfigError::InvalidValue { key: "BCRYPT_COST", .. })
        );
        assert_matches!(
            AppConfig::builder().jwt_secret("").build(),
            Err(ConfigError::MissingValue("JWT_SECRET"))
        );
        assert_matches!(
            AppConfig::builder().frontend_url("localhost:3000").build(),
            Err(ConfigError::InvalidUrl(_))
        );
    }

    #[test]
    fn test_frontend_url_trailing_slash_is_trimmed() {
        let config = AppConfig::builder().frontend_url("https://app.example.com/").build().unwrap();
        assert_eq!(config.frontend_url, "https://app.example.com");
    }
}
