//! Downloadable summary of one analysis.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AnalysisRecord, CompetitorAnalysis, Trend};

/// Flat export of a record, the shape users download as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportDocument {
    pub project_name: String,
    pub original_idea: String,
    pub refined_idea: Option<String>,
    pub problem_statement: Option<String>,
    pub proposed_solution: Option<String>,
    pub confidence_score: u8,
    pub confidence_reason: Option<String>,
    pub motivation: String,
    pub trends: Vec<Trend>,
    pub competitors: BTreeMap<String, CompetitorAnalysis>,
    pub niches: Vec<String>,
    pub citations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ExportDocument {
    #[must_use]
    pub fn from_record(record: &AnalysisRecord) -> Self {
        let refinement = record.refinement.as_ref();
        let research = record.market_research.clone().unwrap_or_default();

        Self {
            project_name: refinement
                .map(|r| r.title.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled Project".to_string()),
            original_idea: record.raw_idea.clone(),
            refined_idea: refinement.map(|r| r.refined_idea.clone()),
            problem_statement: refinement.map(|r| r.problem_statement.clone()),
            proposed_solution: refinement.map(|r| r.proposed_solution.clone()),
            confidence_score: record.confidence,
            confidence_reason: refinement.map(|r| r.confidence_reason.clone()),
            motivation: record.motivation.clone(),
            trends: research.trends,
            competitors: research.analysis,
            niches: research.niche_identification,
            citations: record.search_citations.clone(),
            created_at: record.created_at,
        }
    }

    /// Suggested download name: non-alphanumerics become `_`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem: String = self
            .project_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{stem}_analysis.json")
    }
}
