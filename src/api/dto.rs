//! Request and response bodies for the REST surface.
//!
//! Request bodies accept every field as optional so that a missing field is
//! reported as our own validation error instead of a deserializer rejection.
//! Numeric fields accept a JSON number or a numeric string.

use crate::{
    core::{
        expense::{ExpensePatch, NewExpense, parse_expense_date},
        ledger::ExpenseFilter,
        plan::{NewPlan, PlanPatch},
        user::{CascadeSummary, NewUser, UserPatch},
    },
    entities::{expense, plan, user},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keeps a string only if it has visible content.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn invalid(field: &str) -> Error {
    Error::Validation {
        message: format!("Invalid value for {field}"),
    }
}

/// Reads an optional number that may arrive as a JSON number or a string.
fn number(field: &str, value: Option<&Value>) -> Result<Option<f64>> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(invalid(field)),
    }
}

fn whole_number(field: &str, value: Option<&Value>) -> Result<Option<i32>> {
    let Some(number) = number(field, value)? else {
        return Ok(None);
    };
    if number.fract() != 0.0 || number < f64::from(i32::MIN) || number > f64::from(i32::MAX) {
        return Err(invalid(field));
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = number as i32;
    Ok(Some(whole))
}

fn date(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    present(value).map(|raw| parse_expense_date(&raw)).transpose()
}

/// Body of `POST /api/users` and `PUT /api/users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserBody {
    /// Optional handle
    pub username: Option<String>,
    /// Display name, required on create
    pub name: Option<String>,
    /// Unique email, required on create
    pub email: Option<String>,
    /// Whole number or numeric string
    pub age: Option<Value>,
}

impl UserBody {
    /// Requires `name` and `email`.
    pub fn into_new_user(self) -> Result<NewUser> {
        let age = whole_number("age", self.age.as_ref())?;
        let (Some(name), Some(email)) = (present(self.name), present(self.email)) else {
            return Err(Error::missing_fields());
        };
        Ok(NewUser {
            username: present(self.username),
            name,
            email,
            age,
        })
    }

    /// Every supplied field becomes part of the patch.
    pub fn into_patch(self) -> Result<UserPatch> {
        Ok(UserPatch {
            age: whole_number("age", self.age.as_ref())?,
            username: present(self.username),
            name: present(self.name),
            email: present(self.email),
        })
    }
}

/// Body of `POST /api/plans` and `PUT /api/plans/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBody {
    /// Owner's email; only read on create
    pub user_email: Option<String>,
    /// What the plan is for
    pub purpose: Option<String>,
    /// Target amount
    pub amount: Option<Value>,
    /// Spending limit the ledger measures against
    pub budget: Option<Value>,
    /// Free-form deadline text
    pub deadline: Option<String>,
}

impl PlanBody {
    /// Requires every field.
    pub fn into_new_plan(self) -> Result<NewPlan> {
        let amount = number("amount", self.amount.as_ref())?;
        let budget = number("budget", self.budget.as_ref())?;
        match (
            present(self.user_email),
            present(self.purpose),
            amount,
            budget,
            present(self.deadline),
        ) {
            (Some(user_email), Some(purpose), Some(amount), Some(budget), Some(deadline)) => {
                Ok(NewPlan {
                    user_email,
                    purpose,
                    amount,
                    budget,
                    deadline,
                })
            }
            _ => Err(Error::missing_fields()),
        }
    }

    /// `userEmail` is ignored: a plan never changes owner.
    pub fn into_patch(self) -> Result<PlanPatch> {
        Ok(PlanPatch {
            amount: number("amount", self.amount.as_ref())?,
            budget: number("budget", self.budget.as_ref())?,
            purpose: present(self.purpose),
            deadline: present(self.deadline),
        })
    }
}

/// Body of `POST /api/expenses` and `PUT /api/expenses/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBody {
    /// Owner's email; only read on create
    pub user_email: Option<String>,
    /// Short description
    pub name: Option<String>,
    /// Amount spent
    pub amount: Option<Value>,
    /// `YYYY-MM-DD` or RFC 3339
    pub date: Option<String>,
}

impl ExpenseBody {
    /// Requires every field.
    pub fn into_new_expense(self) -> Result<NewExpense> {
        let amount = number("amount", self.amount.as_ref())?;
        let date = date(self.date)?;
        match (present(self.user_email), present(self.name), amount, date) {
            (Some(user_email), Some(name), Some(amount), Some(date)) => Ok(NewExpense {
                user_email,
                name,
                amount,
                date,
            }),
            _ => Err(Error::missing_fields()),
        }
    }

    /// `userEmail` is ignored: an expense never changes owner.
    pub fn into_patch(self) -> Result<ExpensePatch> {
        Ok(ExpensePatch {
            amount: number("amount", self.amount.as_ref())?,
            date: date(self.date)?,
            name: present(self.name),
        })
    }
}

/// `GET /api/users` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    /// Exact email to look up
    pub email: Option<String>,
}

/// `GET /api/plans` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansQuery {
    /// Owner whose plans are listed
    pub user_email: Option<String>,
}

impl PlansQuery {
    /// Fails with a 400 when `userEmail` is absent or blank.
    pub fn require_user_email(self) -> Result<String> {
        require_user_email(self.user_email)
    }
}

/// `GET /api/expenses` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesQuery {
    /// Owner whose expenses are listed
    pub user_email: Option<String>,
    /// Case-insensitive substring of the expense name
    pub name: Option<String>,
    /// Calendar day, `YYYY-MM-DD`
    pub date: Option<String>,
}

impl ExpensesQuery {
    /// Splits the query into the owner and the optional filter.
    pub fn into_parts(self) -> Result<(String, ExpenseFilter)> {
        let user_email = require_user_email(self.user_email)?;
        let date = match present(self.date) {
            Some(raw) => Some(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                Error::Validation {
                    message: format!("Invalid date filter: {raw:?}"),
                }
            })?),
            None => None,
        };
        Ok((
            user_email,
            ExpenseFilter {
                name: present(self.name),
                date,
            },
        ))
    }
}

/// `GET /api/ledger` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerQuery {
    /// Owner of the plan and expenses
    pub user_email: Option<String>,
    /// Plan to measure against
    pub plan_id: Option<String>,
}

impl LedgerQuery {
    /// An unparsable `planId` is treated like no preference.
    pub fn into_parts(self) -> Result<(String, Option<i64>)> {
        let plan_id = self.plan_id.as_deref().and_then(super::parse_id);
        Ok((require_user_email(self.user_email)?, plan_id))
    }
}

fn require_user_email(user_email: Option<String>) -> Result<String> {
    present(user_email).ok_or_else(|| Error::Validation {
        message: "userEmail query required".to_string(),
    })
}

/// A stored user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Store-assigned id
    pub id: i64,
    /// Optional handle
    pub username: Option<String>,
    /// Display name
    pub name: String,
    /// Unique email
    pub email: String,
    /// Age in years
    pub age: Option<i32>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserDto {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
        }
    }
}

/// A stored plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDto {
    /// Store-assigned id
    pub id: i64,
    /// Owner's email
    pub user_email: String,
    /// What the plan is for
    pub purpose: String,
    /// Target amount
    pub amount: f64,
    /// Spending limit
    pub budget: f64,
    /// Free-form deadline text
    pub deadline: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl From<plan::Model> for PlanDto {
    fn from(plan: plan::Model) -> Self {
        Self {
            id: plan.id,
            user_email: plan.user_email,
            purpose: plan.purpose,
            amount: plan.amount,
            budget: plan.budget,
            deadline: plan.deadline,
            created_at: plan.created_at,
        }
    }
}

/// A stored expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    /// Store-assigned id
    pub id: i64,
    /// Owner's email
    pub user_email: String,
    /// Short description
    pub name: String,
    /// Amount spent
    pub amount: f64,
    /// When the money was spent
    pub date: DateTime<Utc>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl From<expense::Model> for ExpenseDto {
    fn from(expense: expense::Model) -> Self {
        Self {
            id: expense.id,
            user_email: expense.user_email,
            name: expense.name,
            amount: expense.amount,
            date: expense.date,
            created_at: expense.created_at,
        }
    }
}

/// Plain acknowledgement, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageDto {
    /// Human-readable outcome
    pub message: String,
}

impl MessageDto {
    /// Wraps `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `DELETE /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDeletedDto {
    /// Human-readable outcome
    pub message: String,
    /// Plans removed with the user
    pub plans_deleted: u64,
    /// Expenses removed with the user
    pub expenses_deleted: u64,
}

impl From<CascadeSummary> for UserDeletedDto {
    fn from(summary: CascadeSummary) -> Self {
        Self {
            message: "User and all related data deleted".to_string(),
            plans_deleted: summary.plans_deleted,
            expenses_deleted: summary.expenses_deleted,
        }
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthDto {
    /// Fixed banner text
    pub message: String,
    /// Always `healthy` while the process serves
    pub status: String,
    /// Server time of the check
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    fn plan_body(value: Value) -> PlanBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_accept_strings() {
        let plan = plan_body(json!({
            "userEmail": "a@x.com",
            "purpose": "Vacation",
            "amount": "2000",
            "budget": 1999.5,
            "deadline": "2025-12-01"
        }))
        .into_new_plan()
        .unwrap();

        assert_eq!(plan.amount, 2000.0);
        assert_eq!(plan.budget, 1999.5);
    }

    #[test]
    fn test_missing_plan_field_is_reported() {
        let result = plan_body(json!({
            "userEmail": "a@x.com",
            "purpose": "Vacation",
            "amount": 1,
            "deadline": "2025-12-01"
        }))
        .into_new_plan();

        match result {
            Err(Error::Validation { message }) => assert_eq!(message, "Missing required fields"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_amount_is_invalid() {
        let result = plan_body(json!({
            "userEmail": "a@x.com",
            "purpose": "Vacation",
            "amount": "lots",
            "budget": 1,
            "deadline": "2025-12-01"
        }))
        .into_new_plan();
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = plan_body(json!({ "amount": true })).into_patch();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_zero_is_a_present_amount() {
        let expense: ExpenseBody = serde_json::from_value(json!({
            "userEmail": "a@x.com",
            "name": "Free sample",
            "amount": 0,
            "date": "2025-10-01"
        }))
        .unwrap();

        assert_eq!(expense.into_new_expense().unwrap().amount, 0.0);
    }

    #[test]
    fn test_patch_ignores_owner() {
        let patch = plan_body(json!({ "userEmail": "thief@x.com", "budget": 10 }))
            .into_patch()
            .unwrap();

        assert_eq!(
            patch,
            PlanPatch {
                budget: Some(10.0),
                ..PlanPatch::default()
            }
        );
    }

    #[test]
    fn test_user_age_must_be_whole() {
        let body: UserBody =
            serde_json::from_value(json!({ "name": "A", "email": "a@x.com", "age": 30.5 })).unwrap();
        assert!(matches!(body.into_new_user(), Err(Error::Validation { .. })));

        let body: UserBody =
            serde_json::from_value(json!({ "name": "A", "email": "a@x.com", "age": "31" })).unwrap();
        assert_eq!(body.into_new_user().unwrap().age, Some(31));
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let body: UserBody =
            serde_json::from_value(json!({ "name": "  ", "email": "a@x.com" })).unwrap();
        assert!(matches!(body.into_new_user(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_expenses_query_requires_owner() {
        let query = ExpensesQuery::default();
        match query.into_parts() {
            Err(Error::Validation { message }) => assert_eq!(message, "userEmail query required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_ledger_query_ignores_bad_plan_id() {
        let query = LedgerQuery {
            user_email: Some("a@x.com".to_string()),
            plan_id: Some("abc".to_string()),
        };
        assert_eq!(query.into_parts().unwrap(), ("a@x.com".to_string(), None));
    }
}
