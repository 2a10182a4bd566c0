//! Ownership Chain
//!
//! Resolves the budget (and expense) named in the path and checks that the
//! authenticated user may act on it. Every step returns `Result` and the
//! chain stops at the first failure:
//!
//! 1. `budgetId` is a positive integer → 400 "Invalid ID"
//! 2. the budget exists → 404 "Budget not found"
//! 3. the caller owns it → 401 "Access denied"
//! 4. `expenseId` is a positive integer → 400 "Invalid ID"
//! 5. the expense exists → 404 "Expense not found"
//! 6. the expense belongs to the budget → 403 "Invalid Action"
//!
//! Handlers receive the outcome as [`OwnedBudget`] or [`OwnedExpense`].

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use sqlx::SqlitePool;

use crate::backend::budgets::db::get_budget_by_id;
use crate::backend::error::BackendError;
use crate::backend::expenses::db::get_expense_by_id;
use crate::backend::middleware::auth::{authenticated_user, AuthenticatedUser};
use crate::backend::server::state::AppState;
use crate::shared::finance::{Budget, Expense};
use crate::shared::validation::FieldLocation;

pub const BUDGET_ID_PARAM: &str = "budgetId";
pub const EXPENSE_ID_PARAM: &str = "expenseId";

/// A budget the current user owns
#[derive(Debug, Clone)]
pub struct BudgetContext {
    pub user: AuthenticatedUser,
    pub budget: Budget,
}

/// An expense inside a budget the current user owns
#[derive(Debug, Clone)]
pub struct ExpenseContext {
    pub user: AuthenticatedUser,
    pub budget: Budget,
    pub expense: Expense,
}

/// Parse a path id: an optionally `+`-signed run of digits greater than zero
pub fn parse_resource_id(raw: &str, param: &str) -> Result<i64, BackendError> {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let valid = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());

    valid
        .then(|| digits.parse::<i64>().ok())
        .flatten()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            tracing::debug!("Rejected {} {:?}", param, raw);
            BackendError::validation(param, FieldLocation::Params, "Invalid ID")
        })
}

pub async fn find_budget(pool: &SqlitePool, id: i64) -> Result<Budget, BackendError> {
    get_budget_by_id(pool, id).await?.ok_or_else(|| {
        tracing::warn!("Budget {} not found", id);
        BackendError::not_found("Budget not found")
    })
}

pub fn ensure_budget_owner(budget: &Budget, user: &AuthenticatedUser) -> Result<(), BackendError> {
    if budget.is_owned_by(user.id) {
        Ok(())
    } else {
        tracing::warn!("User {} denied access to budget {}", user.id, budget.id);
        Err(BackendError::forbidden(StatusCode::UNAUTHORIZED, "Access denied"))
    }
}

pub async fn find_expense(pool: &SqlitePool, id: i64) -> Result<Expense, BackendError> {
    get_expense_by_id(pool, id).await?.ok_or_else(|| {
        tracing::warn!("Expense {} not found", id);
        BackendError::not_found("Expense not found")
    })
}

pub fn ensure_expense_in_budget(expense: &Expense, budget: &Budget) -> Result<(), BackendError> {
    if expense.belongs_to(budget.id) {
        Ok(())
    } else {
        tracing::warn!("Expense {} is not part of budget {}", expense.id, budget.id);
        Err(BackendError::forbidden(StatusCode::FORBIDDEN, "Invalid Action"))
    }
}

/// Steps 1-3 of the chain
pub async fn resolve_budget(
    pool: &SqlitePool,
    user: AuthenticatedUser,
    raw_budget_id: &str,
) -> Result<BudgetContext, BackendError> {
    let budget_id = parse_resource_id(raw_budget_id, BUDGET_ID_PARAM)?;
    let budget = find_budget(pool, budget_id).await?;
    ensure_budget_owner(&budget, &user)?;
    Ok(BudgetContext { user, budget })
}

/// Steps 4-6 of the chain, on top of a resolved budget
pub async fn resolve_expense(
    pool: &SqlitePool,
    context: BudgetContext,
    raw_expense_id: &str,
) -> Result<ExpenseContext, BackendError> {
    let expense_id = parse_resource_id(raw_expense_id, EXPENSE_ID_PARAM)?;
    let expense = find_expense(pool, expense_id).await?;
    ensure_expense_in_budget(&expense, &context.budget)?;
    Ok(ExpenseContext {
        user: context.user,
        budget: context.budget,
        expense,
    })
}

async fn path_params(parts: &mut Parts, state: &AppState) -> Result<HashMap<String, String>, BackendError> {
    Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map(|Path(params)| params)
        .map_err(|rejection| {
            tracing::warn!("Unreadable path parameters: {}", rejection);
            BackendError::validation(BUDGET_ID_PARAM, FieldLocation::Params, "Invalid ID")
        })
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, BackendError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| BackendError::internal(format!("Route has no {{{}}} segment", name)))
}

/// Extractor for routes under `/api/budgets/{budgetId}`
#[derive(Debug, Clone)]
pub struct OwnedBudget(pub BudgetContext);

impl FromRequestParts<AppState> for OwnedBudget {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;
        let params = path_params(parts, state).await?;
        let context = resolve_budget(&state.db_pool, user, param(&params, BUDGET_ID_PARAM)?).await?;
        Ok(OwnedBudget(context))
    }
}

/// Extractor for routes under `/api/budgets/{budgetId}/expenses/{expenseId}`
#[derive(Debug, Clone)]
pub struct OwnedExpense(pub ExpenseContext);

impl FromRequestParts<AppState> for OwnedExpense {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;
        let params = path_params(parts, state).await?;
        let budget = resolve_budget(&state.db_pool, user, param(&params, BUDGET_ID_PARAM)?).await?;
        let context = resolve_expense(&state.db_pool, budget, param(&params, EXPENSE_ID_PARAM)?).await?;
        Ok(OwnedExpense(context))
    }
}
