//! `/api/ledger` and the health probe.

use super::{
    AppState,
    dto::{HealthDto, LedgerQuery},
};
use crate::{
    core::ledger::{self, LedgerSummary},
    errors::Result,
};
use axum::{
    Json,
    extract::{Query, State},
};

/// Spent/remaining for `?userEmail=` against `?planId=` (or the first plan).
pub async fn get_ledger(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerSummary>> {
    let (user_email, plan_id) = query.into_parts()?;
    let summary = ledger::ledger_for_user(&state.database, &user_email, plan_id).await?;
    Ok(Json(summary))
}

/// Liveness check with the server's current time.
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        message: "DinoTracker API is running!".to_string(),
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
    })
}
