//! `/api/plans` handlers.

use super::{
    AppState,
    error::JsonBody,
    parse_id,
    dto::{MessageDto, PlanBody, PlanDto, PlansQuery},
};
use crate::{
    core::plan,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

fn not_found(raw_id: &str) -> Error {
    Error::PlanNotFound {
        id: raw_id.to_string(),
    }
}

/// Creates a plan; every field is required.
pub async fn create_plan(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<PlanBody>,
) -> Result<(StatusCode, Json<PlanDto>)> {
    let created = plan::create_plan(&state.database, body.into_new_plan()?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Lists the plans of `?userEmail=`, which is required.
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PlansQuery>,
) -> Result<Json<Vec<PlanDto>>> {
    let user_email = query.require_user_email()?;
    let plans = plan::get_plans_for_user(&state.database, &user_email).await?;
    Ok(Json(plans.into_iter().map(PlanDto::from).collect()))
}

/// Fetches one plan by id.
pub async fn get_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PlanDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    let found = plan::get_plan_by_id(&state.database, id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(found.into()))
}

/// Overwrites the supplied fields of a plan.
pub async fn update_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<PlanBody>,
) -> Result<Json<PlanDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    let updated = plan::update_plan(&state.database, id, body.into_patch()?).await?;
    Ok(Json(updated.into()))
}

/// Deletes one plan; expenses are not touched.
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageDto>> {
    let id = parse_id(&raw_id).ok_or_else(|| not_found(&raw_id))?;
    plan::delete_plan(&state.database, id).await?;
    Ok(Json(MessageDto::new("Plan deleted")))
}
