//! Shared test utilities for DinoTracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{expense, plan, user},
    entities,
    errors::Result,
};
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with the given email.
///
/// # Defaults
/// * `name`: "Test User"
/// * `username`, `age`: None
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<entities::user::Model> {
    user::create_user(
        db,
        user::NewUser {
            username: None,
            name: "Test User".to_string(),
            email: email.to_string(),
            age: None,
        },
    )
    .await
}

/// Creates a test plan owned by `user_email` with the given budget.
///
/// # Defaults
/// * `purpose`: "Test plan"
/// * `amount`: same as `budget`
/// * `deadline`: "2025-12-01"
pub async fn create_test_plan(
    db: &DatabaseConnection,
    user_email: &str,
    budget: f64,
) -> Result<entities::plan::Model> {
    plan::create_plan(
        db,
        plan::NewPlan {
            user_email: user_email.to_string(),
            purpose: "Test plan".to_string(),
            amount: budget,
            budget,
            deadline: "2025-12-01".to_string(),
        },
    )
    .await
}

/// Creates a test expense for `user_email`.
///
/// # Defaults
/// * `name`: "Test expense"
/// * `date`: 2025-10-01 00:00 UTC
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_email: &str,
    amount: f64,
) -> Result<entities::expense::Model> {
    create_custom_expense(db, user_email, "Test expense", amount).await
}

/// Creates a test expense with a custom name.
pub async fn create_custom_expense(
    db: &DatabaseConnection,
    user_email: &str,
    name: &str,
    amount: f64,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        expense::NewExpense {
            user_email: user_email.to_string(),
            name: name.to_string(),
            amount,
            date: Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
        },
    )
    .await
}

/// Sets up a database that already holds one user.
/// Returns (db, user) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "a@x.com").await?;
    Ok((db, user))
}
