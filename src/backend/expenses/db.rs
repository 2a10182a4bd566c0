/**
 * Expense Database Operations
 */

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::backend::error::BackendError;
use crate::shared::finance::{Expense, FinanceInput};
use crate::shared::money;

const EXPENSE_COLUMNS: &str = "id, name, amount, budget_id, created_at, updated_at";

fn row_to_expense(row: &SqliteRow) -> Result<Expense, BackendError> {
    Ok(Expense {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        amount: money::from_storage(&row.try_get::<String, _>("amount")?)?,
        budget_id: row.try_get("budget_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Every expense of a budget, oldest first
pub async fn list_expenses_for_budget(pool: &SqlitePool, budget_id: i64) -> Result<Vec<Expense>, BackendError> {
    let rows = sqlx::query(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE budget_id = ? ORDER BY id ASC"
    ))
    .bind(budget_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_expense).collect()
}

/// Insert an expense under `budget_id`
pub async fn create_expense(pool: &SqlitePool, budget_id: i64, input: &FinanceInput) -> Result<Expense, BackendError> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO expenses (name, amount, budget_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {EXPENSE_COLUMNS}"
    ))
    .bind(&input.name)
    .bind(money::to_storage(input.amount))
    .bind(budget_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    row_to_expense(&row)
}

/// Get an expense by ID, regardless of its budget
pub async fn get_expense_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Expense>, BackendError> {
    let row = sqlx::query(&format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(row_to_expense(&row)?)),
        None => Ok(None),
    }
}

/// Overwrite name and amount; the parent budget never changes
pub async fn update_expense(pool: &SqlitePool, id: i64, input: &FinanceInput) -> Result<Expense, BackendError> {
    let row = sqlx::query(&format!(
        "UPDATE expenses SET name = ?, amount = ?, updated_at = ? WHERE id = ? RETURNING {EXPENSE_COLUMNS}"
    ))
    .bind(&input.name)
    .bind(money::to_storage(input.amount))
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await?;

    row_to_expense(&row)
}

pub async fn delete_expense(pool: &SqlitePool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
