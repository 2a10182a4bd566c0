/**
 * Budget Database Operations
 *
 * Amounts are stored as canonical two-decimal text and parsed back into
 * `Decimal` when rows are read.
 */

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::backend::error::BackendError;
use crate::shared::finance::{Budget, FinanceInput};
use crate::shared::money;

const BUDGET_COLUMNS: &str = "id, name, amount, user_id, created_at, updated_at";

fn row_to_budget(row: &SqliteRow) -> Result<Budget, BackendError> {
    Ok(Budget {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        amount: money::from_storage(&row.try_get::<String, _>("amount")?)?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Newest budgets owned by `user_id`, at most `limit` of them
pub async fn list_budgets_for_user(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<Budget>, BackendError> {
    let rows = sqlx::query(&format!(
        "SELECT {BUDGET_COLUMNS} FROM budgets WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ?"
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_budget).collect()
}

/// Insert a budget owned by `user_id`
pub async fn create_budget(pool: &SqlitePool, user_id: i64, input: &FinanceInput) -> Result<Budget, BackendError> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO budgets (name, amount, user_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {BUDGET_COLUMNS}"
    ))
    .bind(&input.name)
    .bind(money::to_storage(input.amount))
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    row_to_budget(&row)
}

/// Get a budget by ID
pub async fn get_budget_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Budget>, BackendError> {
    let row = sqlx::query(&format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(row_to_budget(&row)?)),
        None => Ok(None),
    }
}

/// Overwrite name and amount; the owner never changes
pub async fn update_budget(pool: &SqlitePool, id: i64, input: &FinanceInput) -> Result<Budget, BackendError> {
    let row = sqlx::query(&format!(
        "UPDATE budgets SET name = ?, amount = ?, updated_at = ? WHERE id = ? RETURNING {BUDGET_COLUMNS}"
    ))
    .bind(&input.name)
    .bind(money::to_storage(input.amount))
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await?;

    row_to_budget(&row)
}

/// Delete a budget; its expenses go with it
pub async fn delete_budget(pool: &SqlitePool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
