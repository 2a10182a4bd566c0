/**
 * Expense Handlers
 *
 * Expenses are only reachable through their budget. `create_expense` takes
 * the parent from [`OwnedBudget`]; the others receive an [`OwnedExpense`]
 * whose expense is known to belong to that budget.
 */

use axum::{extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::expenses::db;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::{OwnedBudget, OwnedExpense};
use crate::shared::finance::{Expense, ExpenseInput};

/// POST /api/budgets/{budgetId}/expenses
pub async fn create_expense(
    State(pool): State<SqlitePool>,
    OwnedBudget(context): OwnedBudget,
    ApiJson(input): ApiJson<ExpenseInput>,
) -> Result<(StatusCode, Json<&'static str>), BackendError> {
    let input = input.validate()?;
    let expense = db::create_expense(&pool, context.budget.id, &input).await?;

    tracing::info!("Expense {} added to budget {}", expense.id, context.budget.id);
    Ok((StatusCode::CREATED, Json("Expense created")))
}

/// GET /api/budgets/{budgetId}/expenses/{expenseId}
pub async fn get_expense(OwnedExpense(context): OwnedExpense) -> Json<Expense> {
    Json(context.expense)
}

/// PUT /api/budgets/{budgetId}/expenses/{expenseId}
pub async fn update_expense(
    State(pool): State<SqlitePool>,
    OwnedExpense(context): OwnedExpense,
    ApiJson(input): ApiJson<ExpenseInput>,
) -> Result<Json<&'static str>, BackendError> {
    let input = input.validate()?;
    db::update_expense(&pool, context.expense.id, &input).await?;

    tracing::info!("Expense {} updated", context.expense.id);
    Ok(Json("Expense updated"))
}

/// DELETE /api/budgets/{budgetId}/expenses/{expenseId}
pub async fn delete_expense(
    State(pool): State<SqlitePool>,
    OwnedExpense(context): OwnedExpense,
) -> Result<Json<&'static str>, BackendError> {
    db::delete_expense(&pool, context.expense.id).await?;

    tracing::info!("Expense {} deleted from budget {}", context.expense.id, context.budget.id);
    Ok(Json("Expense deleted"))
}
