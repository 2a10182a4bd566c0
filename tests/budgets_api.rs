//! Budget API integration tests

#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use common::{error_messages, spawn_app};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_budgets_require_session() {
    let app = spawn_app().await;

    let response = app.server.get("/api/budgets").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Not authorized");
}

#[tokio::test]
async fn test_session_is_checked_before_the_database() {
    let app = spawn_app().await;
    app.db_pool.close().await;

    for path in ["/api/budgets", "/api/budgets/1"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.json::<Value>()["error"], "Not authorized");

        let response = app.server.get(path).authorization_bearer("not-a-jwt").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.json::<Value>()["error"], "Invalid token");
    }
}

#[tokio::test]
async fn test_sub_cent_amount_is_rejected() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;

    let response = app
        .server
        .post("/api/budgets")
        .authorization_bearer(&session)
        .json(&json!({ "name": "Tiny", "amount": "0.001" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_messages(&response.json()), vec!["Amount must be greater than zero"]);

    let budgets: Value = app.server.get("/api/budgets").authorization_bearer(&session).await.json();
    assert!(budgets.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_list_budget() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;

    let response = app
        .server
        .post("/api/budgets")
        .authorization_bearer(&session)
        .json(&json!({ "name": "Monthly Budget", "amount": 2000, "userId": 999 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<String>(), "Budget created successfully");

    let user: Value = app.server.get("/api/auth/user").authorization_bearer(&session).await.json();
    let budgets: Value = app.server.get("/api/budgets").authorization_bearer(&session).await.json();

    assert_eq!(budgets.as_array().unwrap().len(), 1);
    assert_eq!(budgets[0]["name"], "Monthly Budget");
    assert_eq!(budgets[0]["amount"], "2000.00");
    assert_eq!(budgets[0]["userId"], user["id"]);
}

#[tokio::test]
async fn test_list_shows_only_own_budgets_newest_first() {
    let app = spawn_app().await;
    let juan = app.signed_in_user("Juan", "juan@example.com").await;
    let ana = app.signed_in_user("Ana", "ana@example.com").await;

    for i in 0..12 {
        app.create_budget(&juan, &format!("Budget {i}"), json!(100 + i)).await;
    }
    app.create_budget(&ana, "Ana's budget", json!(50)).await;

    let budgets: Value = app.server.get("/api/budgets").authorization_bearer(&juan).await.json();
    let names: Vec<&str> = budgets
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();

    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "Budget 11");
    assert_eq!(names[9], "Budget 2");
    assert!(!names.contains(&"Ana's budget"));
}

#[tokio::test]
async fn test_create_budget_with_empty_body() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;

    let response = app
        .server
        .post("/api/budgets")
        .authorization_bearer(&session)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_messages(&response.json()),
        vec![
            "Budget name is required",
            "Amount is required",
            "Amount must be a number",
            "Amount must be greater than zero",
        ]
    );
}

#[tokio::test]
async fn test_invalid_budget_id() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;

    for id in ["abc", "0", "-1", "1.5"] {
        let response = app
            .server
            .get(&format!("/api/budgets/{id}"))
            .authorization_bearer(&session)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "id {id}");
        let body: Value = response.json();
        assert_eq!(error_messages(&body), vec!["Invalid ID"]);
        assert_eq!(body["errors"][0]["path"], "budgetId");
        assert_eq!(body["errors"][0]["location"], "params");
    }
}

#[tokio::test]
async fn test_missing_budget() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;

    let response = app.server.get("/api/budgets/4242").authorization_bearer(&session).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Budget not found");
}

#[tokio::test]
async fn test_other_users_budget_is_denied() {
    let app = spawn_app().await;
    let juan = app.signed_in_user("Juan", "juan@example.com").await;
    let ana = app.signed_in_user("Ana", "ana@example.com").await;
    let budget_id = app.create_budget(&juan, "Rent", json!(900)).await;

    let response = app
        .server
        .get(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&ana)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Access denied");

    let response = app
        .server
        .delete(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&ana)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&juan)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_budget_includes_expenses() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;
    let budget_id = app.create_budget(&session, "Groceries", json!("400")).await;
    app.create_expense(&session, budget_id, "Milk", json!(2.5)).await;
    app.create_expense(&session, budget_id, "Bread", json!("3")).await;

    let budget: Value = app
        .server
        .get(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&session)
        .await
        .json();

    assert_eq!(budget["id"], budget_id);
    assert_eq!(budget["amount"], "400.00");
    let expenses = budget["expenses"].as_array().unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0]["name"], "Milk");
    assert_eq!(expenses[0]["amount"], "2.50");
    assert_eq!(expenses[1]["budgetId"], budget_id);
}

#[tokio::test]
async fn test_update_budget() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;
    let budget_id = app.create_budget(&session, "Travel", json!(1500)).await;

    let response = app
        .server
        .put(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&session)
        .json(&json!({ "name": "Holidays" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .put(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&session)
        .json(&json!({ "name": "Holidays", "amount": "1750.5" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<String>(), "Budget updated successfully");

    let budget: Value = app
        .server
        .get(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&session)
        .await
        .json();
    assert_eq!(budget["name"], "Holidays");
    assert_eq!(budget["amount"], "1750.50");
}

#[tokio::test]
async fn test_delete_budget_removes_expenses() {
    let app = spawn_app().await;
    let session = app.signed_in_user("Juan", "juan@example.com").await;
    let budget_id = app.create_budget(&session, "Car", json!(300)).await;
    let expense_id = app.create_expense(&session, budget_id, "Fuel", json!(60)).await;

    let response = app
        .server
        .delete(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&session)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<String>(), "Budget deleted successfully");

    let response = app
        .server
        .get(&format!("/api/budgets/{budget_id}"))
        .authorization_bearer(&session)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses WHERE id = ?")
        .bind(expense_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
