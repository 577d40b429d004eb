//! Gateway reads over the `ideas` table.
//!
//! Every list comes back newest first (`created_at DESC`, then insertion
//! order DESC for equal timestamps).

use chrono::{DateTime, Utc};

use ideate_core::entities::{AnalysisRecord, MarketResearch, Refinement};

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, parse_datetime, parse_enum, parse_lenient_json,
};
use crate::service::RecordStore;

pub(crate) const RECORD_COLUMNS: &str = "id, owner, project_name, created_at, domain, motivation, \
     raw_idea, confidence, consent, refinement, refinement_raw, market_research, \
     market_research_raw, search_citations, visualization_code, status";

const NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

pub(crate) fn row_to_record(row: &libsql::Row) -> Result<AnalysisRecord, DatabaseError> {
    let confidence = row.get::<i64>(7)?;
    let confidence = u8::try_from(confidence)
        .map_err(|_| DatabaseError::Query(format!("confidence out of range: {confidence}")))?;

    Ok(AnalysisRecord {
        id: row.get::<String>(0)?,
        owner: row.get::<String>(1)?,
        project: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        domain: row.get::<String>(4)?,
        motivation: row.get::<String>(5)?,
        raw_idea: row.get::<String>(6)?,
        confidence,
        consent: row.get::<i64>(8)? != 0,
        refinement: parse_lenient_json::<Refinement>(
            get_opt_string(row, 9)?.as_deref(),
            "refinement",
        ),
        refinement_raw: get_opt_string(row, 10)?,
        market_research: parse_lenient_json::<MarketResearch>(
            get_opt_string(row, 11)?.as_deref(),
            "market_research",
        ),
        market_research_raw: get_opt_string(row, 12)?,
        search_citations: parse_lenient_json(
            get_opt_string(row, 13)?.as_deref(),
            "search_citations",
        )
        .unwrap_or_default(),
        visualization_code: get_opt_string(row, 14)?,
        status: parse_enum(&row.get::<String>(15)?)?,
    })
}

impl RecordStore {
    /// Fetch one record by id regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` when no row has this id.
    pub async fn get_record(&self, id: &str) -> Result<AnalysisRecord, DatabaseError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM ideas WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_record(&row)
    }

    /// The owner's most recently created record.
    pub async fn get_latest(&self, owner: &str) -> Result<Option<AnalysisRecord>, DatabaseError> {
        let sql =
            format!("SELECT {RECORD_COLUMNS} FROM ideas WHERE owner = ?1 {NEWEST_FIRST} LIMIT 1");
        let mut rows = self.db().conn().query(&sql, [owner]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Exact lookup: both `owner` and `id` must match.
    pub async fn get_by_project_id(
        &self,
        owner: &str,
        id: &str,
    ) -> Result<Option<AnalysisRecord>, DatabaseError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM ideas WHERE owner = ?1 AND id = ?2");
        let mut rows = self.db().conn().query(&sql, [owner, id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// `get_by_project_id` when a project is given, otherwise `get_latest`.
    pub async fn get_for_dashboard(
        &self,
        owner: &str,
        project: Option<&str>,
    ) -> Result<Option<AnalysisRecord>, DatabaseError> {
        match project {
            Some(id) => self.get_by_project_id(owner, id).await,
            None => self.get_latest(owner).await,
        }
    }

    /// The owner's records created at or after `since`, newest first.
    pub async fn list_since(
        &self,
        owner: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AnalysisRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM ideas
             WHERE owner = ?1 AND created_at >= ?2 {NEWEST_FIRST}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![owner, format_timestamp(since)])
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    /// All of the owner's records, newest first.
    pub async fn list_for_owner(&self, owner: &str) -> Result<Vec<AnalysisRecord>, DatabaseError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM ideas WHERE owner = ?1 {NEWEST_FIRST}");
        let mut rows = self.db().conn().query(&sql, [owner]).await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }
}
