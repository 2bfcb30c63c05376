//! Core business logic - framework-agnostic user, plan, expense and ledger
//! operations. The HTTP layer only translates requests into these calls.

/// Expense records
pub mod expense;
/// Spent/remaining aggregation over a plan and a user's expenses
pub mod ledger;
/// Plan records
pub mod plan;
/// User accounts and cascade removal
pub mod user;
