/**
 * Budget Routes
 *
 * All routes require a bearer token. Routes with `{budgetId}` resolve the
 * budget through `OwnedBudget`/`OwnedExpense` before the handler runs.
 *
 * - `GET|POST /api/budgets`
 * - `GET|PUT|DELETE /api/budgets/{budgetId}`
 * - `POST /api/budgets/{budgetId}/expenses`
 * - `GET|PUT|DELETE /api/budgets/{budgetId}/expenses/{expenseId}`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::budgets::{create_budget, delete_budget, get_budget, list_budgets, update_budget};
use crate::backend::expenses::{create_expense, delete_expense, get_expense, update_expense};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure budget and expense routes under `/api/budgets`
pub fn configure_budget_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let budgets = Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/{budgetId}", get(get_budget).put(update_budget).delete(delete_budget))
        .route("/{budgetId}/expenses", post(create_expense))
        .route(
            "/{budgetId}/expenses/{expenseId}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.nest("/api/budgets", budgets)
}
