//! Expense entity - A dated outflow logged by a user.
//!
//! Expenses are not tied to a plan id; every expense of a user counts against
//! whichever plan is selected when the ledger is computed.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Email of the user who logged it
    pub user_email: String,
    /// Short description (e.g. "Groceries")
    pub name: String,
    /// Amount spent
    pub amount: f64,
    /// When the money was spent
    pub date: DateTimeUtc,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Expenses are filed by email only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
