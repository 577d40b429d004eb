use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use ideate_core::api::{SuccessResponse, VisualizationUpdate};

use super::{body, non_empty};
use crate::error::ApiError;
use crate::state::AppState;

/// `PUT /api/visualization`: store the diagram editor state on a record.
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<VisualizationUpdate>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let update = body(payload)?;
    let email = non_empty(Some(update.email.as_str()))
        .ok_or_else(|| ApiError::Validation("Email required".into()))?;
    update.state.validate()?;

    state
        .store
        .update_visualization(email, &update.id, &update.state)
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}
