//! Request and response bodies for the HTTP surface.
//!
//! Field names follow the existing web client (`dashboardContext`), so a few
//! structs carry explicit renames.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AnalysisRecord, ProjectSummary, VisualizationState};

/// Body of `POST /api/chat`.
///
/// Without `dashboardContext`, the server builds the context itself from the
/// record named by `email` and `project` (latest record when no project).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "dashboardContext")]
    pub dashboard_context: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

/// Successful reply of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

/// Plain acknowledgement (`POST /api/submit`, `PUT /api/visualization`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Reply of `GET /api/check-status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusResponse {
    pub ready: bool,
    pub email: String,
}

/// Body of `POST /api/flag-complete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FlagRequest {
    #[serde(default)]
    pub email: String,
}

/// Reply of `POST /api/flag-complete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FlagResponse {
    pub success: bool,
    pub message: String,
}

/// Reply of `GET /api/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectSummary>,
}

/// Reply of `GET /api/records`: the owner's records created since an instant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordsResponse {
    pub records: Vec<AnalysisRecord>,
}

/// Reply of `GET /api/completion`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompletionResponse {
    pub ready: bool,
    pub record_id: Option<String>,
    pub project: Option<String>,
}

/// Body of `PUT /api/visualization`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VisualizationUpdate {
    pub email: String,
    pub id: String,
    pub state: VisualizationState,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
