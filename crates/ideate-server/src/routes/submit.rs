use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use ideate_core::api::SuccessResponse;
use ideate_core::entities::IdeaInput;

use super::body;
use crate::error::ApiError;
use crate::state::AppState;

const SUBMISSION_FAILED: &str = "Submission failed";

/// `POST /api/submit`: validate, then hand off to the workflow engine.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<IdeaInput>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let input = body(payload)?;
    input.validate()?;

    let workflow = state
        .workflow
        .as_deref()
        .ok_or_else(|| ApiError::upstream(SUBMISSION_FAILED, "workflow webhook not configured"))?;
    workflow
        .submit(&input)
        .await
        .map_err(|e| ApiError::upstream(SUBMISSION_FAILED, e))?;

    Ok(Json(SuccessResponse { success: true }))
}
