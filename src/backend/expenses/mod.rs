//! Expenses
//!
//! Persistence and HTTP handlers for expenses, always scoped to a budget.

pub mod db;
pub mod handlers;

pub use handlers::{create_expense, delete_expense, get_expense, update_expense};
