//! HTTP mapping for [`Error`].
//!
//! Every failure leaves the service as `{"error": "<message>"}` with one of
//! three statuses: 400 for bad input, 404 for unknown ids, 500 for anything
//! the store or the process got wrong. Request bodies are read through
//! [`JsonBody`] so that unreadable JSON takes the same path.

use crate::errors::Error;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{error, warn};

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Message shown to the user
    pub error: String,
}

/// Status code a given error is reported with.
#[must_use]
pub const fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation { .. } | Error::DuplicateEmail { .. } => StatusCode::BAD_REQUEST,
        Error::UserNotFound { .. } | Error::PlanNotFound { .. } | Error::ExpenseNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        Error::Config { .. }
        | Error::Database(_)
        | Error::Io(_)
        | Error::EnvVar(_)
        | Error::AddrParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: rejection.body_text(),
        }
    }
}

/// `Json` extractor whose rejection is a 400 [`Error::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if self.is_client_error() {
            warn!(%status, error = %self, "Request rejected");
        } else {
            error!(%status, error = ?self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&Error::missing_fields()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&Error::DuplicateEmail {
                message: "UNIQUE constraint failed: users.email".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::UserNotFound { id: "1".to_string() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&Error::PlanNotFound { id: "1".to_string() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&Error::ExpenseNotFound { id: "1".to_string() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&Error::Database(sea_orm::DbErr::Custom("boom".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_email_keeps_store_message() {
        let message = "UNIQUE constraint failed: users.email".to_string();
        let error = Error::DuplicateEmail {
            message: message.clone(),
        };
        assert_eq!(error.to_string(), message);
    }

    #[tokio::test]
    async fn test_unreadable_body_is_a_validation_error() {
        let request = Request::builder()
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(r#"{"name": 5}"#))
            .unwrap();

        let rejection = JsonBody::<crate::api::dto::UserBody>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(rejection, Error::Validation { .. }));
        assert_eq!(status_for(&rejection), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_a_validation_error() {
        let request = Request::builder()
            .body(axum::body::Body::from(r#"{"name": "A"}"#))
            .unwrap();

        let rejection = JsonBody::<crate::api::dto::UserBody>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(rejection, Error::Validation { .. }));
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            Error::PlanNotFound { id: "9".to_string() }.to_string(),
            "Plan not found"
        );
        assert_eq!(
            Error::ExpenseNotFound { id: "9".to_string() }.to_string(),
            "Expense not found"
        );
    }
}
