//! Expense business logic - Handles all expense-related operations.
//!
//! Expenses belong to a user (by email), not to a plan. Dates arrive from
//! the client either as a bare calendar day or a full RFC 3339 timestamp.

use crate::{
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Fields accepted when creating an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// Owner's email
    pub user_email: String,
    /// Short description
    pub name: String,
    /// Amount spent
    pub amount: f64,
    /// When the money was spent
    pub date: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    /// New description
    pub name: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New date
    pub date: Option<DateTime<Utc>>,
}

/// Parses an expense date.
///
/// Accepts `YYYY-MM-DD` (taken as midnight UTC) or an RFC 3339 timestamp.
pub fn parse_expense_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day.and_time(chrono::NaiveTime::default()).and_utc());
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| Error::Validation {
            message: format!("Invalid date: {raw:?}"),
        })
}

/// Creates a new expense.
pub async fn create_expense(
    db: &DatabaseConnection,
    new_expense: NewExpense,
) -> Result<expense::Model> {
    if new_expense.user_email.trim().is_empty() || new_expense.name.trim().is_empty() {
        return Err(Error::missing_fields());
    }

    let model = expense::ActiveModel {
        user_email: Set(new_expense.user_email),
        name: Set(new_expense.name),
        amount: Set(new_expense.amount),
        date: Set(new_expense.date),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    debug!(
        expense_id = created.id,
        user_email = %created.user_email,
        amount = created.amount,
        "Expense created"
    );
    Ok(created)
}

/// Retrieves every expense filed under `user_email`, oldest record first.
pub async fn get_expenses_for_user(
    db: &DatabaseConnection,
    user_email: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::UserEmail.eq(user_email))
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific expense by its unique ID.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Overwrites exactly the fields present in `patch`.
pub async fn update_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    patch: ExpensePatch,
) -> Result<expense::Model> {
    let existing = Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound {
            id: expense_id.to_string(),
        })?;

    let mut active: expense::ActiveModel = existing.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(amount) = patch.amount {
        active.amount = Set(amount);
    }
    if let Some(date) = patch.date {
        active.date = Set(date);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes an expense by id.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let result = Expense::delete_by_id(expense_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ExpenseNotFound {
            id: expense_id.to_string(),
        });
    }
    debug!(expense_id, "Expense deleted");
    Ok(())
}
