//! User entity - An account holder.
//!
//! The email column is the identity every plan and expense points back to,
//! so it carries a unique constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Optional handle chosen at sign-up
    pub username: Option<String>,
    /// Display name
    pub name: String,
    /// Login identity, globally unique
    #[sea_orm(unique)]
    pub email: String,
    /// Optional age in years
    pub age: Option<i32>,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Users are joined to plans and expenses by email, not by a foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
