//! Route handlers, one module per concern.

pub mod chat;
pub mod dashboard;
pub mod records;
pub mod redirect;
pub mod status;
pub mod submit;
pub mod visualization;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;

/// Query string shared by the owner-scoped GET endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
    pub project: Option<String>,
    /// RFC 3339 instant; only records created at or after it count.
    pub since: Option<String>,
    /// Record id to track instead of the earliest new one.
    pub id: Option<String>,
}

impl OwnerQuery {
    /// The trimmed email, or a 400 with `missing` as the message.
    pub fn email(&self, missing: &str) -> Result<&str, ApiError> {
        non_empty(self.email.as_deref()).ok_or_else(|| ApiError::Validation(missing.to_string()))
    }

    pub fn project(&self) -> Option<&str> {
        non_empty(self.project.as_deref())
    }

    pub fn since(&self) -> Result<Option<DateTime<Utc>>, ApiError> {
        non_empty(self.since.as_deref())
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| ApiError::Validation(format!("Invalid 'since' timestamp: {e}")))
            })
            .transpose()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Unwrap a JSON body, turning extractor rejections into a 400.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e.body_text())))
}
