//! Plan business logic - Handles all plan-related operations.
//!
//! Plans are filed under their owner's email. Updates overwrite only the
//! supplied fields; the owner and id of a plan never change.

use crate::{
    entities::{Plan, plan},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Fields accepted when creating a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    /// Owner's email
    pub user_email: String,
    /// What the plan is for
    pub purpose: String,
    /// Target amount
    pub amount: f64,
    /// Spending ceiling
    pub budget: f64,
    /// Deadline as given by the client
    pub deadline: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanPatch {
    /// New purpose
    pub purpose: Option<String>,
    /// New target amount
    pub amount: Option<f64>,
    /// New budget
    pub budget: Option<f64>,
    /// New deadline
    pub deadline: Option<String>,
}

/// Creates a new plan.
///
/// Only presence is checked: blank strings are rejected, numbers are stored
/// as given, negative ones included.
pub async fn create_plan(db: &DatabaseConnection, new_plan: NewPlan) -> Result<plan::Model> {
    if new_plan.user_email.trim().is_empty()
        || new_plan.purpose.trim().is_empty()
        || new_plan.deadline.trim().is_empty()
    {
        return Err(Error::missing_fields());
    }

    let model = plan::ActiveModel {
        user_email: Set(new_plan.user_email),
        purpose: Set(new_plan.purpose),
        amount: Set(new_plan.amount),
        budget: Set(new_plan.budget),
        deadline: Set(new_plan.deadline),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    debug!(plan_id = created.id, user_email = %created.user_email, "Plan created");
    Ok(created)
}

/// Retrieves every plan filed under `user_email`, oldest first.
pub async fn get_plans_for_user(
    db: &DatabaseConnection,
    user_email: &str,
) -> Result<Vec<plan::Model>> {
    Plan::find()
        .filter(plan::Column::UserEmail.eq(user_email))
        .order_by_asc(plan::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific plan by its unique ID.
pub async fn get_plan_by_id(db: &DatabaseConnection, plan_id: i64) -> Result<Option<plan::Model>> {
    Plan::find_by_id(plan_id).one(db).await.map_err(Into::into)
}

/// Overwrites exactly the fields present in `patch`.
pub async fn update_plan(
    db: &DatabaseConnection,
    plan_id: i64,
    patch: PlanPatch,
) -> Result<plan::Model> {
    let existing = Plan::find_by_id(plan_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::PlanNotFound {
            id: plan_id.to_string(),
        })?;

    let mut active: plan::ActiveModel = existing.into();
    if let Some(purpose) = patch.purpose {
        active.purpose = Set(purpose);
    }
    if let Some(amount) = patch.amount {
        active.amount = Set(amount);
    }
    if let Some(budget) = patch.budget {
        active.budget = Set(budget);
    }
    if let Some(deadline) = patch.deadline {
        active.deadline = Set(deadline);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes a plan by id. Expenses are not touched; they belong to the user.
pub async fn delete_plan(db: &DatabaseConnection, plan_id: i64) -> Result<()> {
    let result = Plan::delete_by_id(plan_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::PlanNotFound {
            id: plan_id.to_string(),
        });
    }
    debug!(plan_id, "Plan deleted");
    Ok(())
}
