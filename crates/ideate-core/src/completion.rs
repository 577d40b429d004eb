//! Completion detection for analysis records.
//!
//! The workflow engine writes a record in phases and is known to store an
//! empty placeholder for the research output before the real trend data
//! arrives. A record therefore only counts as complete when both derived
//! outputs and their raw shadows exist AND the trend list is non-empty.
//!
//! Staleness: when waiting on a fresh submission, only records created at or
//! after the submission instant are candidates, so an analysis from an
//! earlier session is never mistaken for the new one.

use chrono::{DateTime, Utc};

use crate::entities::AnalysisRecord;

/// Both derived outputs exist. Existence only, used by list views.
#[must_use]
pub const fn outputs_present(record: &AnalysisRecord) -> bool {
    record.refinement.is_some() && record.market_research.is_some()
}

/// Terminal "complete" check.
#[must_use]
pub fn is_complete(record: &AnalysisRecord) -> bool {
    outputs_present(record)
        && record.refinement_raw.is_some()
        && record.market_research_raw.is_some()
        && record
            .market_research
            .as_ref()
            .is_some_and(|research| !research.trends.is_empty())
}

/// Pick the record a fresh poll should track.
///
/// `records` is expected in gateway order (newest first). Records created
/// before `since` are ignored. With `tracked_id` the match is exact; without
/// it the earliest-created candidate wins, and among equal timestamps the one
/// listed first.
#[must_use]
pub fn select_tracked<'a>(
    records: &'a [AnalysisRecord],
    since: DateTime<Utc>,
    tracked_id: Option<&str>,
) -> Option<&'a AnalysisRecord> {
    let mut candidates = records.iter().filter(|r| r.created_at >= since);
    match tracked_id {
        Some(id) => candidates.find(|r| r.id == id),
        None => candidates.min_by_key(|r| r.created_at),
    }
}

/// Candidate selection for both fresh and existing dashboards.
///
/// With `since` this is [`select_tracked`]. Without it no staleness filter
/// applies: the tracked id if given, otherwise the first (newest) record.
#[must_use]
pub fn select_candidate<'a>(
    records: &'a [AnalysisRecord],
    since: Option<DateTime<Utc>>,
    tracked_id: Option<&str>,
) -> Option<&'a AnalysisRecord> {
    match (since, tracked_id) {
        (Some(since), _) => select_tracked(records, since, tracked_id),
        (None, Some(id)) => records.iter().find(|r| r.id == id),
        (None, None) => records.first(),
    }
}

/// Whether the tracked record for a fresh submission is complete.
#[must_use]
pub fn is_complete_since(
    records: &[AnalysisRecord],
    since: DateTime<Utc>,
    tracked_id: Option<&str>,
) -> bool {
    select_tracked(records, since, tracked_id).is_some_and(is_complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MarketResearch, Refinement, Trend};
    use crate::enums::ProjectStatus;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn record(id: &str, created_at: DateTime<Utc>) -> AnalysisRecord {
        AnalysisRecord {
            id: id.into(),
            owner: "student@example.edu".into(),
            project: None,
            created_at,
            domain: "Education & Learning".into(),
            motivation: "m".into(),
            raw_idea: "i".into(),
            confidence: 6,
            consent: true,
            refinement: None,
            refinement_raw: None,
            market_research: None,
            market_research_raw: None,
            search_citations: Vec::new(),
            visualization_code: None,
            status: ProjectStatus::Processing,
        }
    }

    fn with_refinement(mut r: AnalysisRecord) -> AnalysisRecord {
        r.refinement = Some(Refinement {
            title: "Planner".into(),
            ..Refinement::default()
        });
        r.refinement_raw = Some("{\"title\":\"Planner\"}".into());
        r
    }

    fn with_research(mut r: AnalysisRecord, trends: Vec<Trend>) -> AnalysisRecord {
        r.market_research = Some(MarketResearch {
            trends,
            ..MarketResearch::default()
        });
        r.market_research_raw = Some("{}".into());
        r
    }

    fn complete(id: &str, created_at: DateTime<Utc>) -> AnalysisRecord {
        with_research(
            with_refinement(record(id, created_at)),
            vec![Trend::Plain("Remote study groups".into())],
        )
    }

    #[test]
    fn phase_one_row_is_not_complete() {
        assert!(!is_complete(&record("a", t0())));
    }

    #[test]
    fn refinement_only_is_not_complete() {
        assert!(!is_complete(&with_refinement(record("a", t0()))));
    }

    #[test]
    fn research_only_is_not_complete() {
        let r = with_research(record("a", t0()), vec![Trend::Plain("x".into())]);
        assert!(!is_complete(&r));
    }

    #[test]
    fn empty_trend_placeholder_is_not_complete() {
        let r = with_research(with_refinement(record("a", t0())), Vec::new());
        assert!(outputs_present(&r));
        assert!(!is_complete(&r));
    }

    #[test]
    fn empty_legacy_mapping_is_not_complete() {
        let mut r = with_refinement(record("a", t0()));
        r.market_research = Some(serde_json::from_str(r#"{"trends": {}}"#).unwrap());
        r.market_research_raw = Some("{}".into());
        assert!(!is_complete(&r));
    }

    #[test]
    fn non_empty_legacy_mapping_is_complete() {
        let mut r = with_refinement(record("a", t0()));
        r.market_research = Some(serde_json::from_str(r#"{"trends": {"a": "b"}}"#).unwrap());
        r.market_research_raw = Some("{}".into());
        assert!(is_complete(&r));
    }

    #[test]
    fn missing_raw_shadow_is_not_complete() {
        let mut r = complete("a", t0());
        r.market_research_raw = None;
        assert!(outputs_present(&r));
        assert!(!is_complete(&r));

        let mut r = complete("a", t0());
        r.refinement_raw = None;
        assert!(!is_complete(&r));
    }

    #[test]
    fn full_record_is_complete() {
        assert!(is_complete(&complete("a", t0())));
        assert!(complete("a", t0()).is_complete());
    }

    #[test]
    fn stale_records_are_never_selected() {
        let since = t0();
        let records = vec![complete("old", since - Duration::seconds(1))];
        assert!(select_tracked(&records, since, None).is_none());
        assert!(!is_complete_since(&records, since, None));
    }

    #[test]
    fn record_created_at_the_instant_qualifies() {
        let since = t0();
        let records = vec![complete("new", since)];
        assert_eq!(select_tracked(&records, since, None).unwrap().id, "new");
    }

    #[rstest]
    #[case::earliest_new_wins(None, "first")]
    #[case::explicit_id(Some("second"), "second")]
    fn selection_among_new_records(#[case] tracked: Option<&str>, #[case] expected: &str) {
        let since = t0();
        // newest first, as the gateway returns them
        let records = vec![
            record("second", since + Duration::seconds(20)),
            record("first", since + Duration::seconds(2)),
            complete("stale", since - Duration::seconds(300)),
        ];
        let picked = select_tracked(&records, since, tracked).unwrap();
        assert_eq!(picked.id, expected);
    }

    #[test]
    fn equal_timestamps_resolve_to_gateway_order() {
        let since = t0();
        let at = since + Duration::seconds(5);
        let records = vec![record("listed-first", at), record("listed-second", at)];
        assert_eq!(select_tracked(&records, since, None).unwrap().id, "listed-first");
    }

    #[test]
    fn unknown_tracked_id_selects_nothing() {
        let since = t0();
        let records = vec![complete("a", since + Duration::seconds(1))];
        assert!(select_tracked(&records, since, Some("b")).is_none());
    }

    #[test]
    fn without_since_the_newest_record_is_the_candidate() {
        let since = t0();
        let records = vec![
            record("latest", since - Duration::minutes(1)),
            complete("older", since - Duration::minutes(30)),
        ];
        assert_eq!(select_candidate(&records, None, None).unwrap().id, "latest");
        assert_eq!(select_candidate(&records, None, Some("older")).unwrap().id, "older");
        assert!(select_candidate(&records, Some(since), None).is_none());
    }

    #[test]
    fn stale_complete_record_does_not_mask_pending_new_one() {
        let since = t0();
        let records = vec![
            record("pending", since + Duration::seconds(9)),
            complete("previous", since - Duration::minutes(30)),
        ];
        assert!(!is_complete_since(&records, since, None));
    }
}
