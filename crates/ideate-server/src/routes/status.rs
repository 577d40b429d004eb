//! Completion flag endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};

use ideate_core::api::{FlagRequest, FlagResponse, StatusResponse};

use super::{OwnerQuery, body, non_empty};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/check-status?email=`
pub async fn check_status(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let email = query.email("Email required")?;
    let ready = state.store.latest_ready(email).await?;
    Ok(Json(StatusResponse {
        ready,
        email: email.to_string(),
    }))
}

/// `POST /api/flag-complete {email}`
pub async fn flag_complete(
    State(state): State<AppState>,
    payload: Result<Json<FlagRequest>, JsonRejection>,
) -> Result<Json<FlagResponse>, ApiError> {
    let req = body(payload)?;
    let email = non_empty(Some(req.email.as_str()))
        .ok_or_else(|| ApiError::Validation("Email required".into()))?;

    let record = state
        .store
        .mark_latest_complete(email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No analysis found for this email".into()))?;

    tracing::info!(owner = email, record_id = %record.id, "analysis flagged complete");
    Ok(Json(FlagResponse {
        success: true,
        message: "Completion flag set".into(),
    }))
}
