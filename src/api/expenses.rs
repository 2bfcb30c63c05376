//! `/api/expenses` handlers.

use super::{
    AppState,
    error::JsonBody,
    parse_id,
    dto::{ExpenseBody, ExpenseDto, ExpensesQuery, MessageDto},
};
use crate::{
    core::{expense, ledger},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

fn not_found(raw_id: &str) -> Error {
    Error::ExpenseNotFound {
        id: raw_id.to_string(),
    }
}

/// Records an expense; every field is required.
pub async fn create_expense(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ExpenseBody>,
) -> Result<(StatusCode, Json<ExpenseDto>)> {
    let created = expense::create_expense(&state.database, body.into_new_expense()?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Lists the expenses of `?userEmail=`, optionally narrowed by `name` and `date`.
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Json<Vec<ExpenseDto>>> {
    let (user_email, filter) = query.into_parts()?;
    let expenses = expense::get_expenses_for_user(&state.database, &user_email).await?;
    let expenses = ledger::filter_expenses(expenses, &filter);
    Ok(Json(expenses.into_iter().map(ExpenseDto::from).collect()))
}

/// Overwrites the supplied fields of an expense.
pub async fn update_expense(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<ExpenseBody>,
) -> Result<Json<ExpenseDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    let updated = expense::update_expense(&state.database, id, body.into_patch()?).await?;
    Ok(Json(updated.into()))
}

/// Deletes one expense.
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    expense::delete_expense(&state.database, id).await?;
    Ok(Json(MessageDto::new("Expense deleted")))
}
