//! `/api/users` handlers.

use super::{
    AppState,
    error::JsonBody,
    parse_id,
    dto::{UserBody, UserDeletedDto, UserDto, UsersQuery},
};
use crate::{
    core::user,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;

fn not_found(raw_id: &str) -> Error {
    Error::UserNotFound {
        id: raw_id.to_string(),
    }
}

/// Registers a user. Fails with 400 when the email is taken.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserBody>,
) -> Result<(StatusCode, Json<UserDto>)> {
    let new_user = body.into_new_user()?;
    let created = user::create_user(&state.database, new_user).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Lists all users, or the single user matching `?email=`.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<UserDto>>> {
    let users = match query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => user::get_user_by_email(&state.database, email)
            .await?
            .into_iter()
            .collect(),
        None => user::get_all_users(&state.database).await?,
    };
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Fetches one user by id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    let found = user::get_user_by_id(&state.database, id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(found.into()))
}

/// Overwrites the supplied fields of a user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<UserBody>,
) -> Result<Json<UserDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    let updated = user::update_user(&state.database, id, body.into_patch()?).await?;
    Ok(Json(updated.into()))
}

/// Deletes the user and everything filed under their email.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDeletedDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    let summary = user::delete_user(&state.database, id).await?;
    info!(user_id = id, "Cascade delete finished");
    Ok(Json(summary.into()))
}
