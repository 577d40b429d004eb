//! Project picker and the durable completion flag.

use ideate_core::completion;
use ideate_core::entities::{AnalysisRecord, ProjectSummary};
use ideate_core::enums::ProjectStatus;

use crate::error::DatabaseError;
use crate::service::RecordStore;

fn summarize(record: &AnalysisRecord) -> ProjectSummary {
    // Existence only: list views don't wait for the trend list.
    let status = if completion::outputs_present(record) {
        ProjectStatus::Complete
    } else {
        ProjectStatus::Processing
    };
    ProjectSummary {
        id: record.id.clone(),
        name: record.display_name(),
        created_at: record.created_at,
        status,
    }
}

impl RecordStore {
    /// The owner's projects, newest first.
    pub async fn list_projects(&self, owner: &str) -> Result<Vec<ProjectSummary>, DatabaseError> {
        let records = self.list_for_owner(owner).await?;
        Ok(records.iter().map(summarize).collect())
    }

    /// Set the durable completion flag on the owner's latest record.
    ///
    /// Returns the flagged record, or `None` when the owner has no records.
    /// Flagging an already complete record is a no-op.
    pub async fn mark_latest_complete(
        &self,
        owner: &str,
    ) -> Result<Option<AnalysisRecord>, DatabaseError> {
        let Some(mut record) = self.get_latest(owner).await? else {
            return Ok(None);
        };
        if record.status != ProjectStatus::Complete {
            self.set_status(&record, ProjectStatus::Complete).await?;
            record.status = ProjectStatus::Complete;
        }
        Ok(Some(record))
    }

    /// Whether the owner's latest record is flagged or detected complete.
    pub async fn latest_ready(&self, owner: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .get_latest(owner)
            .await?
            .is_some_and(|r| r.status == ProjectStatus::Complete || r.is_complete()))
    }
}
