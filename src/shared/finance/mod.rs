//! Finance Module
//!
//! This module contains the data structures for budgets and expenses:
//!
//! - `Budget` - A named monetary allocation owned by one user
//! - `Expense` - A named monetary charge against one budget
//! - `BudgetInput` / `ExpenseInput` - Raw request payloads
//! - `FinanceInput` - A validated name and amount
//!
//! # Usage
//!
//! ```rust
//! use cashtracker::shared::finance::BudgetInput;
//!
//! let input: BudgetInput = serde_json::from_str(r#"{"name":"Groceries","amount":400}"#).unwrap();
//! let valid = input.validate().unwrap();
//! assert_eq!(valid.amount.to_string(), "400.00");
//! ```

pub mod budget;
pub mod expense;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::shared::error::SharedError;
use crate::shared::money::validate_amount;
use crate::shared::validation::{FieldLocation, Validator};

pub use budget::{Budget, BudgetInput, BudgetWithExpenses, BUDGET_PAGE_SIZE};
pub use expense::{Expense, ExpenseInput};

/// A validated name and amount pair, shared by budgets and expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceInput {
    pub name: String,
    pub amount: Decimal,
}

/// Render a loosely typed JSON value as text for the `name` rules
fn text_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Validate a `{name, amount}` payload
///
/// `name_message` is the violation reported for an empty name, which differs
/// between budgets and expenses.
pub(crate) fn validate_named_amount(
    name: Option<&Value>,
    amount: Option<&Value>,
    name_message: &str,
) -> Result<FinanceInput, SharedError> {
    let mut validator = Validator::new(FieldLocation::Body);
    let name = text_value(name);
    validator.non_empty("name", &name, name_message);
    let amount = validate_amount(&mut validator, "amount", amount);

    validator.into_result()?;
    match amount {
        Some(amount) => Ok(FinanceInput {
            name: name.trim().to_string(),
            amount,
        }),
        None => Err(SharedError::validation("amount", FieldLocation::Body, "Amount must be a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_string_name_is_rendered() {
        assert_eq!(text_value(Some(&json!(42))), "42");
        assert_eq!(text_value(Some(&Value::Null)), "");
        assert_eq!(text_value(None), "");
    }

    #[test]
    fn test_name_is_trimmed() {
        let input = validate_named_amount(Some(&json!("  Rent ")), Some(&json!(900)), "required").unwrap();
        assert_eq!(input.name, "Rent");
    }
}
