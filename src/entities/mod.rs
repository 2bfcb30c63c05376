//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod expense;
pub mod plan;
pub mod user;

pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use plan::{Column as PlanColumn, Entity as Plan, Model as PlanModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
