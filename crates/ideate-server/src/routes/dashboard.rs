//! Project picker, dashboard record, and export.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use ideate_core::api::ProjectsResponse;
use ideate_core::entities::AnalysisRecord;
use ideate_core::export::ExportDocument;

use super::OwnerQuery;
use crate::error::ApiError;
use crate::state::AppState;

async fn load(state: &AppState, query: &OwnerQuery) -> Result<AnalysisRecord, ApiError> {
    let email = query.email("Email parameter is required")?;
    state
        .store
        .get_for_dashboard(email, query.project())
        .await?
        .ok_or_else(|| ApiError::NotFound("No data found for this email".into()))
}

/// `GET /api/projects?email=`
pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let email = query.email("Email parameter is required")?;
    let projects = state.store.list_projects(email).await?;
    Ok(Json(ProjectsResponse { projects }))
}

/// `GET /api/dashboard?email=&project=`
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    Ok(Json(load(&state, &query).await?))
}

/// `GET /api/export?email=&project=`, served as a download.
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let record = load(&state, &query).await?;
    let document = ExportDocument::from_record(&record);
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(document)))
}
