//! Unified error type for the whole crate.
//!
//! Record operations, configuration loading and the HTTP layer all return
//! [`Result`]. The HTTP status each variant maps to lives in `api::error`.

use thiserror::Error;

/// Every failure the service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or a value could not be interpreted.
    #[error("{message}")]
    Validation {
        /// Human-readable reason, returned to the client as-is
        message: String,
    },

    /// The store rejected a user because the email is already taken.
    /// `message` is the store's own wording.
    #[error("{message}")]
    DuplicateEmail {
        /// Store-provided violation message
        message: String,
    },

    /// No user with this id.
    #[error("User not found")]
    UserNotFound {
        /// Requested id as received
        id: String,
    },

    /// No plan with this id.
    #[error("Plan not found")]
    PlanNotFound {
        /// Requested id as received
        id: String,
    },

    /// No expense with this id.
    #[error("Expense not found")]
    ExpenseNotFound {
        /// Requested id as received
        id: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any other store failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (binding the listener, reading files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable present but unusable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Bind address could not be parsed.
    #[error("Invalid listen address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    /// Shorthand for the "field absent" validation error the façade reports.
    #[must_use]
    pub fn missing_fields() -> Self {
        Self::Validation {
            message: "Missing required fields".to_string(),
        }
    }

    /// Whether this error is the caller's fault (bad input) rather than ours.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::DuplicateEmail { .. }
                | Self::UserNotFound { .. }
                | Self::PlanNotFound { .. }
                | Self::ExpenseNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
