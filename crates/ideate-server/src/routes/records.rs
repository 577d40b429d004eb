//! The poller's backing query and the detector surface.

use axum::Json;
use axum::extract::{Query, State};

use ideate_core::api::{CompletionResponse, RecordsResponse};
use ideate_core::completion;

use super::OwnerQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/records?email=&since=`: newest first.
pub async fn records(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let email = query.email("Email required")?;
    let records = match query.since()? {
        Some(since) => state.store.list_since(email, since).await?,
        None => state.store.list_for_owner(email).await?,
    };
    Ok(Json(RecordsResponse { records }))
}

/// `GET /api/completion?email=&since=&id=`
pub async fn completion(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let email = query.email("Email required")?;
    let since = query.since()?;
    let records = match since {
        Some(since) => state.store.list_since(email, since).await?,
        None => state.store.list_for_owner(email).await?,
    };

    let tracked = completion::select_candidate(&records, since, query.id.as_deref());
    Ok(Json(CompletionResponse {
        ready: tracked.is_some_and(completion::is_complete),
        record_id: tracked.map(|r| r.id.clone()),
        project: tracked.and_then(|r| r.project.clone()),
    }))
}
