//! Plan entity - A savings/spending goal with a budget ceiling and deadline.
//!
//! A user may own several plans. Plans reference their owner through
//! `user_email` only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Email of the owning user
    pub user_email: String,
    /// What the plan is for (e.g. "Vacation")
    pub purpose: String,
    /// Target amount
    pub amount: f64,
    /// Spending ceiling the ledger measures against
    pub budget: f64,
    /// Deadline exactly as the client sent it
    pub deadline: String,
    /// When the plan was created
    pub created_at: DateTimeUtc,
}

/// `Plan` has no declared relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
