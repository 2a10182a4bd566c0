//! Budget Data Structure
//!
//! Represents a named monetary allocation owned by exactly one user.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::SharedError;
use crate::shared::finance::expense::Expense;
use crate::shared::finance::{validate_named_amount, FinanceInput};

/// Maximum number of budgets returned by the list endpoint
pub const BUDGET_PAGE_SIZE: i64 = 10;

/// A budget as stored and returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub name: String,
    /// Serialized as a string with two decimal places
    pub amount: Decimal,
    /// Owning user, always taken from the session
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Whether `user_id` owns this budget
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// A budget together with its expenses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetWithExpenses {
    #[serde(flatten)]
    pub budget: Budget,
    pub expenses: Vec<Expense>,
}

/// Create/update payload for a budget
///
/// Only `name` and `amount` are read. Owner fields sent by a client are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
}

impl BudgetInput {
    pub fn validate(&self) -> Result<FinanceInput, SharedError> {
        validate_named_amount(self.name.as_ref(), self.amount.as_ref(), "Budget name is required")
    }
}
