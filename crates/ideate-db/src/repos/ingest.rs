//! Phased writes performed on behalf of the workflow engine.
//!
//! Phase 1 inserts the input columns. Phase 2 fills the refinement, then the
//! market research. Once a record is complete its derived outputs are frozen;
//! only `visualization_code` may still change.

use chrono::{DateTime, Utc};

use ideate_core::entities::{
    AnalysisRecord, IdeaInput, MarketResearch, Refinement, VisualizationState,
};
use ideate_core::enums::ProjectStatus;

use crate::error::DatabaseError;
use crate::helpers::format_timestamp;
use crate::service::RecordStore;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Other(e.into()))
}

impl RecordStore {
    /// Phase 1: insert a row holding only the submitted input.
    pub async fn insert_submission(
        &self,
        input: &IdeaInput,
        project: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<AnalysisRecord, DatabaseError> {
        let id = self.db().generate_id("idea").await?;
        let owner = input.email.trim();

        self.db()
            .conn()
            .execute(
                "INSERT INTO ideas (id, owner, project_name, created_at, domain, motivation,
                                    raw_idea, confidence, consent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    owner,
                    project,
                    format_timestamp(created_at),
                    input.effective_domain(),
                    input.motivation.as_str(),
                    input.idea.as_str(),
                    i64::from(input.confidence),
                    i64::from(input.consent)
                ],
            )
            .await?;

        tracing::info!(id = %id, owner, "submission recorded");
        self.get_record(&id).await
    }

    /// Insert a fully formed record as-is (seeding and fixtures).
    pub async fn import_record(&self, record: &AnalysisRecord) -> Result<(), DatabaseError> {
        let refinement = record.refinement.as_ref().map(to_json).transpose()?;
        let research = record.market_research.as_ref().map(to_json).transpose()?;
        let completed_at =
            (record.status == ProjectStatus::Complete).then(|| format_timestamp(Utc::now()));

        self.db()
            .conn()
            .execute(
                "INSERT INTO ideas (id, owner, project_name, created_at, domain, motivation,
                                    raw_idea, confidence, consent, refinement, refinement_raw,
                                    market_research, market_research_raw, search_citations,
                                    visualization_code, status, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                         ?16, ?17)",
                libsql::params![
                    record.id.as_str(),
                    record.owner.as_str(),
                    record.project.clone(),
                    format_timestamp(record.created_at),
                    record.domain.as_str(),
                    record.motivation.as_str(),
                    record.raw_idea.as_str(),
                    i64::from(record.confidence),
                    i64::from(record.consent),
                    refinement,
                    record.refinement_raw.clone(),
                    research,
                    record.market_research_raw.clone(),
                    to_json(&record.search_citations)?,
                    record.visualization_code.clone(),
                    record.status.as_str(),
                    completed_at
                ],
            )
            .await?;
        Ok(())
    }

    /// Phase 2a: store the refinement parsed from the engine's raw output.
    ///
    /// # Errors
    ///
    /// `InvalidState` when the record is already complete or `raw` is not a
    /// refinement object; `NoResult` when the id is unknown.
    pub async fn record_refinement(
        &self,
        id: &str,
        raw: &str,
    ) -> Result<AnalysisRecord, DatabaseError> {
        self.ensure_writable(id).await?;
        let refinement: Refinement = serde_json::from_str(raw)
            .map_err(|e| {
                DatabaseError::InvalidState(format!("refinement output is not valid: {e}"))
            })?;

        self.db()
            .conn()
            .execute(
                "UPDATE ideas SET refinement = ?1, refinement_raw = ?2 WHERE id = ?3",
                libsql::params![to_json(&refinement)?, raw, id],
            )
            .await?;

        tracing::debug!(id, "refinement stored");
        self.settle(id).await
    }

    /// Phase 2b: store the market research and its citations.
    ///
    /// A legacy mapping of trends is normalised to the sequence shape here;
    /// `raw` is kept untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Self::record_refinement`].
    pub async fn record_market_research(
        &self,
        id: &str,
        raw: &str,
        citations: &[String],
    ) -> Result<AnalysisRecord, DatabaseError> {
        self.ensure_writable(id).await?;
        let research: MarketResearch = serde_json::from_str(raw)
            .map_err(|e| {
                DatabaseError::InvalidState(format!("market research output is not valid: {e}"))
            })?;

        self.db()
            .conn()
            .execute(
                "UPDATE ideas
                 SET market_research = ?1, market_research_raw = ?2, search_citations = ?3
                 WHERE id = ?4",
                libsql::params![to_json(&research)?, raw, to_json(&citations)?, id],
            )
            .await?;

        tracing::debug!(id, trends = research.trends.len(), "market research stored");
        self.settle(id).await
    }

    /// Replace the stored diagram state of one of the owner's records.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the diagram does not validate; `NoResult` if the
    /// owner has no record with this id.
    pub async fn update_visualization(
        &self,
        owner: &str,
        id: &str,
        state: &VisualizationState,
    ) -> Result<(), DatabaseError> {
        state
            .validate()
            .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
        let code = state.to_code().map_err(|e| DatabaseError::Other(e.into()))?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE ideas SET visualization_code = ?1 WHERE owner = ?2 AND id = ?3",
                libsql::params![code, owner, id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Move a record to `next`, rejecting transitions the status does not allow.
    pub(crate) async fn set_status(
        &self,
        record: &AnalysisRecord,
        next: ProjectStatus,
    ) -> Result<(), DatabaseError> {
        if !record.status.can_transition_to(next) {
            return Err(DatabaseError::InvalidState(format!(
                "record {} cannot move from {} to {next}",
                record.id, record.status
            )));
        }
        let completed_at = (next == ProjectStatus::Complete).then(|| format_timestamp(Utc::now()));
        self.db()
            .conn()
            .execute(
                "UPDATE ideas SET status = ?1, completed_at = ?2 WHERE id = ?3",
                libsql::params![next.as_str(), completed_at, record.id.as_str()],
            )
            .await?;
        tracing::info!(id = %record.id, status = %next, "record status changed");
        Ok(())
    }

    async fn ensure_writable(&self, id: &str) -> Result<(), DatabaseError> {
        // The flag alone does not freeze a record: it can be set before the
        // pipeline finishes writing.
        let record = self.get_record(id).await?;
        if record.is_complete() {
            return Err(DatabaseError::InvalidState(format!(
                "record {id} is complete; derived outputs are frozen"
            )));
        }
        Ok(())
    }

    /// Re-read after a phase write and flag the record once it is complete.
    async fn settle(&self, id: &str) -> Result<AnalysisRecord, DatabaseError> {
        let mut record = self.get_record(id).await?;
        if record.is_complete() && record.status == ProjectStatus::Processing {
            self.set_status(&record, ProjectStatus::Complete).await?;
            record.status = ProjectStatus::Complete;
        }
        Ok(record)
    }
}
