/**
 * Budget Handlers
 *
 * Every handler except `list_budgets` and `create_budget` receives an
 * [`OwnedBudget`], so the budget has already been validated, loaded and
 * checked against the caller before the handler body runs.
 */

use axum::{extract::State, http::StatusCode, Json};
use sqlx::SqlitePool;

use crate::backend::budgets::db;
use crate::backend::error::BackendError;
use crate::backend::expenses::db::list_expenses_for_budget;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::{AuthUser, OwnedBudget};
use crate::shared::finance::{Budget, BudgetInput, BudgetWithExpenses, BUDGET_PAGE_SIZE};

/// GET /api/budgets
pub async fn list_budgets(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Budget>>, BackendError> {
    let budgets = db::list_budgets_for_user(&pool, user.id, BUDGET_PAGE_SIZE).await?;
    Ok(Json(budgets))
}

/// POST /api/budgets
///
/// The owner is always the caller; owner fields in the body are ignored.
pub async fn create_budget(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<BudgetInput>,
) -> Result<(StatusCode, Json<&'static str>), BackendError> {
    let input = input.validate()?;
    let budget = db::create_budget(&pool, user.id, &input).await?;

    tracing::info!("Budget {} created for user {}", budget.id, user.id);
    Ok((StatusCode::CREATED, Json("Budget created successfully")))
}

/// GET /api/budgets/{budgetId}
pub async fn get_budget(
    State(pool): State<SqlitePool>,
    OwnedBudget(context): OwnedBudget,
) -> Result<Json<BudgetWithExpenses>, BackendError> {
    let expenses = list_expenses_for_budget(&pool, context.budget.id).await?;
    Ok(Json(BudgetWithExpenses {
        budget: context.budget,
        expenses,
    }))
}

/// PUT /api/budgets/{budgetId}
pub async fn update_budget(
    State(pool): State<SqlitePool>,
    OwnedBudget(context): OwnedBudget,
    ApiJson(input): ApiJson<BudgetInput>,
) -> Result<Json<&'static str>, BackendError> {
    let input = input.validate()?;
    db::update_budget(&pool, context.budget.id, &input).await?;

    tracing::info!("Budget {} updated", context.budget.id);
    Ok(Json("Budget updated successfully"))
}

/// DELETE /api/budgets/{budgetId}
pub async fn delete_budget(
    State(pool): State<SqlitePool>,
    OwnedBudget(context): OwnedBudget,
) -> Result<Json<&'static str>, BackendError> {
    db::delete_budget(&pool, context.budget.id).await?;

    tracing::info!("Budget {} deleted by user {}", context.budget.id, context.user.id);
    Ok(Json("Budget deleted successfully"))
}
