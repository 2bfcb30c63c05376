//! Ledger aggregation - spent and remaining budget for a user.
//!
//! Nothing here is persisted. The summary is recomputed on every read from
//! the selected plan's budget and *all* of the user's expenses; expenses are
//! not scoped to a plan.

use crate::{
    core::{expense as expense_ops, plan as plan_ops},
    entities::{expense, plan},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::debug;

/// Derived spending figures for one user against one (or no) plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Plan the budget was taken from, if any
    pub plan_id: Option<i64>,
    /// Budget of the selected plan, zero when none is selected
    pub budget: f64,
    /// Sum of all expense amounts
    pub spent: f64,
    /// `budget - spent`; negative when overspent
    pub remaining: f64,
    /// Number of expenses folded in
    pub expense_count: usize,
    /// Share of the budget spent, in percent
    pub percent_used: f64,
    /// Whether spending exceeds the budget
    pub over_budget: bool,
}

/// Criteria for narrowing an expense list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the expense name
    pub name: Option<String>,
    /// Calendar day (UTC) the expense must fall on
    pub date: Option<NaiveDate>,
}

impl ExpenseFilter {
    /// True when the filter would let everything through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(|name| name.trim().is_empty()) && self.date.is_none()
    }

    fn matches(&self, expense: &expense::Model) -> bool {
        let name_ok = self.name.as_deref().is_none_or(|needle| {
            expense
                .name
                .to_lowercase()
                .contains(&needle.trim().to_lowercase())
        });
        let date_ok = self
            .date
            .is_none_or(|day| expense.date.date_naive() == day);
        name_ok && date_ok
    }
}

/// Amount an expense contributes to the total. Non-finite values count as zero.
fn contribution(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

/// Sums the amounts of `expenses`.
#[must_use]
pub fn total_spent(expenses: &[expense::Model]) -> f64 {
    expenses
        .iter()
        .map(|expense| contribution(expense.amount))
        .sum()
}

/// Share of `budget` consumed by `spent`, in percent.
///
/// A zero budget yields zero rather than infinity.
#[must_use]
pub fn calculate_percent_used(spent: f64, budget: f64) -> f64 {
    if budget == 0.0 {
        return 0.0;
    }

    (spent / budget) * 100.0
}

/// Folds `expenses` against the budget of `plan`.
///
/// With no plan the budget is zero and `remaining` is the negated total.
#[must_use]
pub fn summarize(plan: Option<&plan::Model>, expenses: &[expense::Model]) -> LedgerSummary {
    let budget = plan.map_or(0.0, |plan| contribution(plan.budget));
    let spent = total_spent(expenses);

    LedgerSummary {
        plan_id: plan.map(|plan| plan.id),
        budget,
        spent,
        remaining: budget - spent,
        expense_count: expenses.len(),
        percent_used: calculate_percent_used(spent, budget),
        over_budget: spent > budget,
    }
}

/// Picks the plan the ledger should measure against.
///
/// The preferred plan wins when it is among `plans`; otherwise the first
/// plan; otherwise none.
#[must_use]
pub fn select_plan(plans: &[plan::Model], preferred_id: Option<i64>) -> Option<&plan::Model> {
    preferred_id
        .and_then(|id| plans.iter().find(|plan| plan.id == id))
        .or_else(|| plans.first())
}

/// Returns the expenses that satisfy `filter`, preserving order.
#[must_use]
pub fn filter_expenses(expenses: Vec<expense::Model>, filter: &ExpenseFilter) -> Vec<expense::Model> {
    if filter.is_empty() {
        return expenses;
    }
    expenses
        .into_iter()
        .filter(|expense| filter.matches(expense))
        .collect()
}

/// Loads a user's plans and expenses and summarizes them.
pub async fn ledger_for_user(
    db: &DatabaseConnection,
    user_email: &str,
    preferred_plan_id: Option<i64>,
) -> Result<LedgerSummary> {
    let plans = plan_ops::get_plans_for_user(db, user_email).await?;
    let expenses = expense_ops::get_expenses_for_user(db, user_email).await?;

    let summary = summarize(select_plan(&plans, preferred_plan_id), &expenses);
    debug!(
        user_email,
        plan_id = ?summary.plan_id,
        spent = summary.spent,
        remaining = summary.remaining,
        "Ledger computed"
    );
    Ok(summary)
}
