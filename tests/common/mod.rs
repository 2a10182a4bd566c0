//! Common test utilities and helpers
//!
//! Every test gets its own in-memory database and a `RecordingMailer`, so
//! confirmation and reset tokens are read from the outbox the same way a
//! user would read them from their inbox.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use cashtracker::backend::create_app_with;
use cashtracker::backend::mail::RecordingMailer;
use cashtracker::backend::server::config::connect_in_memory;
use cashtracker::shared::config::{AppConfig, Environment};
use serde_json::{json, Value};

pub const PASSWORD: &str = "password123";

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub mailer: RecordingMailer,
    pub db_pool: sqlx::SqlitePool,
}

/// Config used by the test apps: cheap hashing and a generous rate limit
pub fn test_config(rate_limit_max: u32) -> AppConfig {
    AppConfig::builder()
        .environment(Environment::Test)
        .jwt_secret("test-secret")
        .bcrypt_cost(4)
        .rate_limit_max(rate_limit_max)
        .build()
        .expect("Failed to build test config")
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(1000)).await
}

pub async fn spawn_app_with(config: AppConfig) -> TestApp {
    let db_pool = connect_in_memory().await.expect("Failed to create test database");
    let mailer = RecordingMailer::new();
    let app = create_app_with(db_pool.clone(), config, Arc::new(mailer.clone()));
    let server = TestServer::new(app).expect("Failed to start test server");

    TestApp {
        server,
        mailer,
        db_pool,
    }
}

impl TestApp {
    /// Register an account and return the confirmation token from the outbox
    pub async fn register(&self, name: &str, email: &str) -> String {
        let response = self
            .server
            .post("/api/auth/create-account")
            .json(&json!({ "name": name, "email": email, "password": PASSWORD }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        self.mailer
            .token_for(email)
            .expect("Confirmation email should carry a token")
    }

    pub async fn confirm(&self, token: &str) {
        let response = self
            .server
            .post("/api/auth/confirm-account")
            .json(&json!({ "token": token }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json::<String>()
    }

    /// Register, confirm and log in a user, returning their session token
    pub async fn signed_in_user(&self, name: &str, email: &str) -> String {
        let token = self.register(name, email).await;
        self.confirm(&token).await;
        self.login(email, PASSWORD).await
    }

    /// Create a budget and return its id
    pub async fn create_budget(&self, session: &str, name: &str, amount: Value) -> i64 {
        let response = self
            .server
            .post("/api/budgets")
            .authorization_bearer(session)
            .json(&json!({ "name": name, "amount": amount }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        self.latest_budget_id(session).await
    }

    /// Id of the most recently created budget visible to `session`
    pub async fn latest_budget_id(&self, session: &str) -> i64 {
        let budgets: Value = self
            .server
            .get("/api/budgets")
            .authorization_bearer(session)
            .await
            .json();
        budgets[0]["id"].as_i64().expect("Budget list should not be empty")
    }

    /// Create an expense and return its id
    pub async fn create_expense(&self, session: &str, budget_id: i64, name: &str, amount: Value) -> i64 {
        let response = self
            .server
            .post(&format!("/api/budgets/{budget_id}/expenses"))
            .authorization_bearer(session)
            .json(&json!({ "name": name, "amount": amount }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let budget: Value = self
            .server
            .get(&format!("/api/budgets/{budget_id}"))
            .authorization_bearer(session)
            .await
            .json();
        budget["expenses"]
            .as_array()
            .and_then(|expenses| expenses.last())
            .and_then(|expense| expense["id"].as_i64())
            .expect("Budget should list the new expense")
    }
}

/// Messages of a `{"errors": [...]}` validation body, in order
pub fn error_messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["msg"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
