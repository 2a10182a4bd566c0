//! Shared Module
//!
//! This module contains types and data structures that do not depend on the
//! server stack: the budget and expense records returned by the API, request
//! payloads with their validation rules, monetary amounts and configuration.
//!
//! # Overview
//!
//! The shared module provides plain serde types that the backend serializes
//! into HTTP responses and that test clients can deserialize again.

/// Budget and expense data structures
pub mod finance;

/// Monetary amount parsing
pub mod money;

/// Field-level request validation
pub mod validation;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use finance::{Budget, BudgetInput, BudgetWithExpenses, Expense, ExpenseInput, FinanceInput};
pub use validation::{FieldError, FieldLocation, Validator};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Environment, SmtpConfig};
