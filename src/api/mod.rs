//! HTTP layer - the REST façade over the core operations.
//!
//! One route per CRUD operation. Handlers only translate between JSON and the
//! `core` functions; all status mapping goes through [`error`].

/// Request/response bodies
pub mod dto;
/// Error-to-response mapping
pub mod error;
/// Expense routes
pub mod expenses;
/// Ledger summary and health routes
pub mod ledger;
/// Plan routes
pub mod plans;
/// User routes
pub mod users;

use crate::{config::AppConfig, errors::Result};
use axum::{
    Router,
    routing::{get, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared data available to all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection for all store operations
    pub database: Arc<DatabaseConnection>,
}

impl AppState {
    /// Creates a new `AppState` around the given connection.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

/// Interprets a path id. Anything that is not an integer cannot name a
/// stored record, so callers report it as not found.
#[must_use]
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// All routes with request tracing, without CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ledger::health))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/plans",
            get(plans::list_plans).post(plans::create_plan),
        )
        .route(
            "/api/plans/{id}",
            get(plans::get_plan)
                .put(plans::update_plan)
                .delete(plans::delete_plan),
        )
        .route(
            "/api/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route(
            "/api/expenses/{id}",
            put(expenses::update_expense).delete(expenses::delete_expense),
        )
        .route("/api/ledger", get(ledger::get_ledger))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The full application as served: routes plus CORS per configuration.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let cors = if config.permissive_cors {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };
    router(state).layer(cors)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &AppConfig, database: DatabaseConnection) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = app(AppState::new(database), config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server simply runs until killed
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
