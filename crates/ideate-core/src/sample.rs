//! A complete sample record for local development and tests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::entities::{AnalysisRecord, CompetitorAnalysis, MarketResearch, Refinement, Trend};
use crate::enums::ProjectStatus;

/// Build a finished analysis owned by `owner` and created at `created_at`.
#[must_use]
pub fn sample_record(owner: &str, created_at: DateTime<Utc>) -> AnalysisRecord {
    let refinement = Refinement {
        title: "Adaptive Study Planner".into(),
        refined_idea: "A planner that builds a daily study schedule from the syllabus, \
                       calendar, and self-reported energy, and reshuffles it when a \
                       session is missed."
            .into(),
        confidence_reason: "Addresses a common student pain point with proven scheduling \
                            techniques."
            .into(),
        problem_statement: "Students struggle to keep consistent study habits across \
                            several subjects."
            .into(),
        proposed_solution: "Generate adaptive daily plans, auto-reschedule missed sessions, \
                            and reward streaks with short focus timers."
            .into(),
    };

    let mut analysis = BTreeMap::new();
    analysis.insert(
        "StudyBuddy".to_string(),
        CompetitorAnalysis {
            pros: vec!["Large content library".into()],
            cons: vec!["No calendar integration".into()],
            opportunity: "Plug scheduling into the tools students already use.".into(),
        },
    );
    analysis.insert(
        "FocusLoop".to_string(),
        CompetitorAnalysis {
            pros: vec!["Polished focus timer".into()],
            cons: vec!["Generic motivation features".into()],
            opportunity: "Tie rewards to syllabus progress instead of raw minutes.".into(),
        },
    );

    let research = MarketResearch {
        trends: vec![
            Trend::Plain("Personalization now adapts to energy and mood, not just grades.".into()),
            Trend::Detailed {
                trend: "Learning tools embed into existing platforms".into(),
                description: "Calendar and LMS integrations lower adoption friction.".into(),
                relevance: "High".into(),
                url: Some("https://example.org/edtech-integration".into()),
            },
            Trend::Plain("Micro-rewards and streaks drive consistency.".into()),
        ],
        analysis,
        niche_identification: vec![
            "Offline-first planner for low-connectivity regions".into(),
            "LMS plug-in that adds adaptive micro-rewards".into(),
        ],
    };

    AnalysisRecord {
        id: format!("idea-{}", created_at.timestamp_micros()),
        owner: owner.to_string(),
        project: None,
        created_at,
        domain: "Education & Learning".into(),
        motivation: "Students often struggle to balance multiple subjects.".into(),
        raw_idea: "An AI study planner that adapts to my syllabus, calendar, and energy.".into(),
        confidence: 8,
        consent: true,
        refinement_raw: serde_json::to_string(&refinement).ok(),
        refinement: Some(refinement),
        market_research_raw: serde_json::to_string(&research).ok(),
        market_research: Some(research),
        search_citations: vec![
            "https://example.org/edtech-integration".into(),
            "https://example.org/study-habits".into(),
        ],
        visualization_code: None,
        status: ProjectStatus::Complete,
    }
}
