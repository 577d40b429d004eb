use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use ideate_core::api::{ChatRequest, ChatResponse};
use ideate_core::context::{DashboardContext, cap_context};

use super::{body, non_empty};
use crate::error::ApiError;
use crate::state::AppState;

const CHAT_FAILED: &str = "Failed to get AI response";

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let req = body(payload)?;
    if req.message.trim().is_empty() {
        return Err(ApiError::Validation("Message required".into()));
    }
    let assistant = state
        .assistant
        .as_deref()
        .ok_or_else(|| ApiError::upstream(CHAT_FAILED, "assistant endpoint not configured"))?;

    let context = match non_empty(req.dashboard_context.as_deref()) {
        Some(ctx) => Some(cap_context(ctx, state.context_max_chars).to_string()),
        None => match non_empty(req.email.as_deref()) {
            Some(email) => state
                .store
                .get_for_dashboard(email, non_empty(req.project.as_deref()))
                .await?
                .map(|record| DashboardContext::from_record(&record).render()),
            None => None,
        },
    };

    let response = assistant
        .ask(&req.message, context.as_deref())
        .await
        .map_err(|e| ApiError::upstream(CHAT_FAILED, e))?;
    Ok(Json(ChatResponse { response }))
}
