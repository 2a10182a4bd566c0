//! Expense Data Structure
//!
//! Represents a named monetary charge against one budget.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::SharedError;
use crate::shared::finance::{validate_named_amount, FinanceInput};

/// An expense as stored and returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    /// Parent budget, always taken from the resolved route
    pub budget_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn belongs_to(&self, budget_id: i64) -> bool {
        self.budget_id == budget_id
    }
}

/// Create/update payload for an expense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl ExpenseInput {
    pub fn validate(&self) -> Result<FinanceInput, SharedError> {
        validate_named_amount(self.name.as_ref(), self.amount.as_ref(), "Expense name is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expense_name_message() {
        let input = ExpenseInput {
            name: Some(json!("")),
            amount: Some(json!(25)),
        };
        let error = input.validate().unwrap_err();
        assert_eq!(error.field_errors()[0].msg, "Expense name is required");
    }

    #[test]
    fn test_valid_expense_input() {
        let input: ExpenseInput = serde_json::from_value(json!({"name": "Coffee", "amount": "3.5", "budgetId": 12})).unwrap();
        let valid = input.validate().unwrap();
        assert_eq!(valid.name, "Coffee");
        assert_eq!(valid.amount.to_string(), "3.50");
    }

    #[test]
    fn test_belongs_to() {
        let now = Utc::now();
        let expense = Expense {
            id: 3,
            name: "Coffee".to_string(),
            amount: Decimal::new(350, 2),
            budget_id: 12,
            created_at: now,
            updated_at: now,
        };
        assert!(expense.belongs_to(12));
        assert!(!expense.belongs_to(13));
    }
}
