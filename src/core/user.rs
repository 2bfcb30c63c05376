//! User business logic - account creation, lookup, update and cascade removal.
//!
//! Email uniqueness is enforced by the store; a violation is reported as
//! [`Error::DuplicateEmail`] carrying the store's own message. Deleting a user
//! removes every plan and expense filed under the user's email in the same
//! database transaction, so a failure half-way leaves nothing orphaned.

use crate::{
    entities::{Expense, Plan, User, expense, plan, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Fields accepted when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Optional handle
    pub username: Option<String>,
    /// Display name
    pub name: String,
    /// Login identity, must be unique
    pub email: String,
    /// Optional age
    pub age: Option<i32>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New handle
    pub username: Option<String>,
    /// New display name
    pub name: Option<String>,
    /// New email, still subject to uniqueness
    pub email: Option<String>,
    /// New age
    pub age: Option<i32>,
}

/// What a user deletion removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeSummary {
    /// Email the removed records were filed under
    pub user_email: String,
    /// Number of plans removed with the user
    pub plans_deleted: u64,
    /// Number of expenses removed with the user
    pub expenses_deleted: u64,
}

fn map_store_error(err: DbErr) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Error::DuplicateEmail { message },
        _ => Error::Database(err),
    }
}

/// Creates a user with a store-generated id and creation timestamp.
///
/// # Errors
/// - [`Error::Validation`] if `name` or `email` is blank
/// - [`Error::DuplicateEmail`] if another user already has `email`
pub async fn create_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    if new_user.name.trim().is_empty() || new_user.email.trim().is_empty() {
        return Err(Error::missing_fields());
    }

    let model = user::ActiveModel {
        username: Set(new_user.username),
        name: Set(new_user.name),
        email: Set(new_user.email),
        age: Set(new_user.age),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = model.insert(db).await.map_err(map_store_error)?;
    info!(user_id = created.id, email = %created.email, "User created");
    Ok(created)
}

/// Retrieves all users in creation order.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by email, the identity the frontend logs in with.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by id, returning None if it does not exist.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Overwrites exactly the fields present in `patch`.
///
/// The id and creation timestamp never change. Changing the email does not
/// re-file the user's plans or expenses.
pub async fn update_user(
    db: &DatabaseConnection,
    user_id: i64,
    patch: UserPatch,
) -> Result<user::Model> {
    let existing = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })?;

    let mut active: user::ActiveModel = existing.into();
    if let Some(username) = patch.username {
        active.username = Set(Some(username));
    }
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(email) = patch.email {
        active.email = Set(email);
    }
    if let Some(age) = patch.age {
        active.age = Set(Some(age));
    }

    let updated = active.update(db).await.map_err(map_store_error)?;
    debug!(user_id, "User updated");
    Ok(updated)
}

/// Deletes a user together with all plans and expenses sharing its email.
///
/// Runs in one transaction. If the user is already gone the call fails with
/// [`Error::UserNotFound`] and nothing else is touched.
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<CascadeSummary> {
    let txn = db.begin().await?;

    let user = User::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })?;
    let user_email = user.email.clone();

    user.delete(&txn).await?;

    let plans = Plan::delete_many()
        .filter(plan::Column::UserEmail.eq(user_email.as_str()))
        .exec(&txn)
        .await?;
    let expenses = Expense::delete_many()
        .filter(expense::Column::UserEmail.eq(user_email.as_str()))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(
        user_id,
        email = %user_email,
        plans_deleted = plans.rows_affected,
        expenses_deleted = expenses.rows_affected,
        "User and related records deleted"
    );

    Ok(CascadeSummary {
        user_email,
        plans_deleted: plans.rows_affected,
        expenses_deleted: expenses.rows_affected,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{expense as expense_ops, plan as plan_ops};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            username: None,
            name: name.to_string(),
            email: email.to_string(),
            age: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_user(&db, new_user("", "a@x.com")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_user(&db, new_user("Alice", "   ")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(
            &db,
            NewUser {
                username: Some("dino".to_string()),
                name: "Alice".to_string(),
                email: "alice@x.com".to_string(),
                age: Some(30),
            },
        )
        .await?;

        assert!(user.id > 0);
        assert_eq!(user.username.as_deref(), Some("dino"));
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@x.com");
        assert_eq!(user.age, Some(30));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() -> Result<()> {
        let (db, _) = setup_with_user().await?;

        let result = create_user(&db, new_user("Other", "a@x.com")).await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateEmail { .. }));

        // The original user is still the only one
        assert_eq!(get_all_users(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_by_email() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let found = get_user_by_email(&db, "a@x.com").await?;
        assert_eq!(found.unwrap().id, user.id);

        assert!(get_user_by_email(&db, "nobody@x.com").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_overwrites_only_supplied_fields() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let updated = update_user(
            &db,
            user.id,
            UserPatch {
                name: Some("Renamed".to_string()),
                age: Some(41),
                ..UserPatch::default()
            },
        )
        .await?;

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.age, Some(41));
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.created_at, user.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_to_taken_email_fails() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        create_test_user(&db, "b@x.com").await?;

        let result = update_user(
            &db,
            user.id,
            UserPatch {
                email: Some("b@x.com".to_string()),
                ..UserPatch::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateEmail { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_user(&db, 999, UserPatch::default()).await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_cascades_to_plans_and_expenses() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        create_test_user(&db, "b@x.com").await?;

        let plan_a = create_test_plan(&db, "a@x.com", 2000.0).await?;
        create_test_plan(&db, "a@x.com", 500.0).await?;
        let expense_a = create_test_expense(&db, "a@x.com", 300.0).await?;
        let plan_b = create_test_plan(&db, "b@x.com", 100.0).await?;
        let expense_b = create_test_expense(&db, "b@x.com", 10.0).await?;

        let summary = delete_user(&db, user.id).await?;
        assert_eq!(summary.user_email, "a@x.com");
        assert_eq!(summary.plans_deleted, 2);
        assert_eq!(summary.expenses_deleted, 1);

        assert!(get_user_by_id(&db, user.id).await?.is_none());
        assert!(plan_ops::get_plan_by_id(&db, plan_a.id).await?.is_none());
        assert!(expense_ops::get_expense_by_id(&db, expense_a.id).await?.is_none());
        assert!(plan_ops::get_plans_for_user(&db, "a@x.com").await?.is_empty());
        assert!(expense_ops::get_expenses_for_user(&db, "a@x.com").await?.is_empty());

        // Another user's records are untouched
        assert!(plan_ops::get_plan_by_id(&db, plan_b.id).await?.is_some());
        assert!(expense_ops::get_expense_by_id(&db, expense_b.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_cascade_rolls_back() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let plan = create_test_plan(&db, "a@x.com", 2000.0).await?;

        // The last step of the cascade now fails
        db.execute_unprepared("DROP TABLE expenses").await?;

        let result = delete_user(&db, user.id).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        assert!(get_user_by_id(&db, user.id).await?.is_some());
        assert!(plan_ops::get_plan_by_id(&db, plan.id).await?.is_some());
        assert_eq!(plan_ops::get_plans_for_user(&db, "a@x.com").await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_user_does_not_cascade() -> Result<()> {
        let db = setup_test_db().await?;
        let orphan_plan = create_test_plan(&db, "ghost@x.com", 100.0).await?;

        let result = delete_user(&db, 42).await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { .. }));

        assert!(plan_ops::get_plan_by_id(&db, orphan_plan.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_twice_reports_not_found() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        delete_user(&db, user.id).await?;
        let result = delete_user(&db, user.id).await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { .. }));

        Ok(())
    }
}
