use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// One entry in an owner's project picker.
///
/// `status` here only checks that both derived outputs exist; it is looser
/// than the completion detector on purpose, list views don't wait for trends.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: ProjectStatus,
}
