//! Structured dashboard context for the assistant.
//!
//! Instead of forwarding whatever the page rendered, callers build a
//! fixed-shape [`DashboardContext`] from the record and render it to text.
//! Free-form context coming in over HTTP is still accepted but capped with
//! [`cap_context`].

use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AnalysisRecord;

/// Upper bound on list entries copied into the context.
const MAX_LIST_ITEMS: usize = 8;

/// Competitor name and the opening it leaves.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompetitorBrief {
    pub name: String,
    pub opportunity: String,
}

/// Summary of one analysis record, shaped for an LLM prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardContext {
    pub title: String,
    pub domain: String,
    pub refined_idea: String,
    pub problem_statement: String,
    pub proposed_solution: String,
    pub confidence: u8,
    pub confidence_reason: String,
    pub trends: Vec<String>,
    pub competitors: Vec<CompetitorBrief>,
    pub niches: Vec<String>,
}

impl DashboardContext {
    #[must_use]
    pub fn from_record(record: &AnalysisRecord) -> Self {
        let refinement = record.refinement.clone().unwrap_or_default();
        let research = record.market_research.as_ref();

        Self {
            title: record.display_name(),
            domain: record.domain.clone(),
            refined_idea: refinement.refined_idea,
            problem_statement: refinement.problem_statement,
            proposed_solution: refinement.proposed_solution,
            confidence: record.confidence,
            confidence_reason: refinement.confidence_reason,
            trends: research
                .map(|r| {
                    r.trends
                        .iter()
                        .take(MAX_LIST_ITEMS)
                        .map(|t| t.text().to_string())
                        .collect()
                })
                .unwrap_or_default(),
            competitors: research
                .map(|r| {
                    r.analysis
                        .iter()
                        .take(MAX_LIST_ITEMS)
                        .map(|(name, a)| CompetitorBrief {
                            name: name.clone(),
                            opportunity: a.opportunity.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            niches: research
                .map(|r| {
                    r.niche_identification
                        .iter()
                        .take(MAX_LIST_ITEMS)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Render as plain text sections.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Project: {}", self.title);
        let _ = writeln!(out, "Domain: {}", self.domain);
        let _ = writeln!(out, "Refined idea: {}", self.refined_idea);
        let _ = writeln!(out, "Problem: {}", self.problem_statement);
        let _ = writeln!(out, "Solution: {}", self.proposed_solution);
        let _ = writeln!(
            out,
            "Confidence: {}/10 ({})",
            self.confidence, self.confidence_reason
        );
        push_list(&mut out, "Trends", self.trends.iter().map(String::as_str));
        push_list(
            &mut out,
            "Competitors",
            self.competitors.iter().map(|c| c.name.as_str()),
        );
        for c in &self.competitors {
            if !c.opportunity.is_empty() {
                let _ = writeln!(out, "Opportunity vs {}: {}", c.name, c.opportunity);
            }
        }
        push_list(&mut out, "Niches", self.niches.iter().map(String::as_str));
        out
    }
}

fn push_list<'a>(out: &mut String, heading: &str, items: impl Iterator<Item = &'a str>) {
    let _ = writeln!(out, "{heading}:");
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

/// Truncate free-form context to at most `max_chars` characters.
#[must_use]
pub fn cap_context(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
