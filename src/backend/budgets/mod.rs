//! Budgets
//!
//! Persistence and HTTP handlers for budgets. Access control lives in
//! `middleware::ownership`.

pub mod db;
pub mod handlers;

pub use handlers::{create_budget, delete_budget, get_budget, list_budgets, update_budget};
