use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::trend::{Trend, deserialize_trends};
use crate::enums::ProjectStatus;

/// Derived output A: the refined framing of the idea.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Refinement {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub refined_idea: String,
    #[serde(default)]
    pub confidence_reason: String,
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub proposed_solution: String,
}

/// Strengths, weaknesses, and the opening left by one competitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompetitorAnalysis {
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub opportunity: String,
}

/// Derived output B: trends, competitor analysis, and niches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MarketResearch {
    #[serde(default, deserialize_with = "deserialize_trends")]
    pub trends: Vec<Trend>,
    /// Competitor name to analysis.
    #[serde(default)]
    pub analysis: BTreeMap<String, CompetitorAnalysis>,
    #[serde(default)]
    pub niche_identification: Vec<String>,
}

/// One idea submission and everything the pipeline derived from it.
///
/// Inserted by the workflow engine with only the input fields, then updated
/// in place with [`Refinement`] and later [`MarketResearch`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub id: String,
    /// Email-like identity of the submitter.
    pub owner: String,
    /// Optional human-readable project name.
    pub project: Option<String>,
    pub created_at: DateTime<Utc>,
    pub domain: String,
    pub motivation: String,
    pub raw_idea: String,
    /// Self-assessed confidence, 1-10.
    pub confidence: u8,
    pub consent: bool,
    pub refinement: Option<Refinement>,
    pub refinement_raw: Option<String>,
    pub market_research: Option<MarketResearch>,
    pub market_research_raw: Option<String>,
    #[serde(default)]
    pub search_citations: Vec<String>,
    /// Serialized diagram editor state, see `VisualizationState`.
    pub visualization_code: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl AnalysisRecord {
    /// Whether the pipeline has finished with this record.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        crate::completion::is_complete(self)
    }

    /// Display name: explicit project name, then refined title, then a placeholder.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.project
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| {
                self.refinement
                    .as_ref()
                    .map(|r| r.title.as_str())
                    .filter(|t| !t.trim().is_empty())
            })
            .unwrap_or("Untitled Project")
            .to_string()
    }
}
