//! Database configuration module for DinoTracker.
//!
//! Connects to the store and creates the `users`, `plans` and `expenses`
//! tables from the entity definitions using `SeaORM`'s
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::{Expense, Plan, User};
use crate::errors::Result;
use std::path::{Path, PathBuf};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info};

/// Fallback location when neither `config.toml` nor `DATABASE_URL` name one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/dino_tracker.sqlite?mode=rwc";

/// File a `sqlite://` URL points at, or None for in-memory and other backends.
#[must_use]
pub fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Opens a connection pool to `database_url`.
///
/// For file-backed `SQLite` the parent directory is created first, since
/// `mode=rwc` only creates the file itself.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .as_deref()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }

    debug!(%database_url, "Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet.
///
/// Safe to call on every start; existing tables and rows are left alone.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table_for(db, User).await?;
    create_table_for(db, Plan).await?;
    create_table_for(db, Expense).await?;
    info!("Database tables ensured (users, plans, expenses)");
    Ok(())
}

async fn create_table_for<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ExpenseModel, PlanModel, UserModel};
    use sea_orm::QuerySelect;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite://data/dino_tracker.sqlite?mode=rwc"),
            Some(PathBuf::from("data/dino_tracker.sqlite"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/dino"), None);
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<PlanModel> = Plan::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let users: Vec<UserModel> = User::find().all(&db).await?;
        assert!(users.is_empty());
        Ok(())
    }
}
