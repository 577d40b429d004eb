//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"error": "..."}`. Upstream and
//! database failures are logged with their detail; the client only sees the
//! generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use ideate_core::api::ErrorBody;
use ideate_core::errors::CoreError;
use ideate_db::error::DatabaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input. The message is shown to the client.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// An external collaborator failed. Only `public` reaches the client.
    #[error("{public}: {detail}")]
    Upstream { public: &'static str, detail: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn upstream(public: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Upstream {
            public,
            detail: detail.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Serialization(e) => Self::Validation(format!("Invalid request body: {e}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Upstream { public, detail } => {
                tracing::error!(%detail, "{public}");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
            Self::Database(DatabaseError::InvalidState(msg)) => (StatusCode::BAD_REQUEST, msg),
            Self::Database(DatabaseError::NoResult) => {
                (StatusCode::NOT_FOUND, "Record not found".to_string())
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (ApiError::Validation("Email required".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("nope".into()), StatusCode::NOT_FOUND),
            (
                ApiError::upstream("Submission failed", "503 workflow paused"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Database(DatabaseError::InvalidState("frozen".into())),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::Database(DatabaseError::NoResult), StatusCode::NOT_FOUND),
            (
                ApiError::Database(DatabaseError::Query("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
