//! Poller timeline on a paused clock.
//!
//! The scripted source plays the workflow engine: a phase-1 row appears at one
//! offset and the completed analysis at another, measured from the moment the
//! poller starts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use tokio::time::Instant;

use ideate_core::entities::AnalysisRecord;
use ideate_core::sample::sample_record;
use ideate_poller::{
    PollOutcome, PollRequest, PollState, Poller, PollerSettings, RecordSource, SourceError,
    StatusPhase,
};

const OWNER: &str = "student@example.edu";

#[derive(Clone, Default)]
struct Script {
    row_at: Option<Duration>,
    complete_at: Option<Duration>,
    fail_until: Option<Duration>,
    stale_complete: bool,
    hang: bool,
}

struct ScriptedSource {
    start: Instant,
    script: Script,
    calls: Arc<Mutex<Vec<Duration>>>,
}

impl ScriptedSource {
    fn new(script: Script) -> (Self, Arc<Mutex<Vec<Duration>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                start: Instant::now(),
                script,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

fn pending_row(id: &str, created_at: DateTime<Utc>) -> AnalysisRecord {
    let mut record = sample_record(OWNER, created_at);
    record.id = id.into();
    record.refinement = None;
    record.refinement_raw = None;
    record.market_research = None;
    record.market_research_raw = None;
    record
}

fn complete_row(id: &str, created_at: DateTime<Utc>) -> AnalysisRecord {
    let mut record = sample_record(OWNER, created_at);
    record.id = id.into();
    record
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn records(
        &self,
        _owner: &str,
        _since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalysisRecord>, SourceError> {
        let now = self.start.elapsed();
        self.calls.lock().unwrap().push(now);

        if self.script.hang {
            std::future::pending::<()>().await;
        }
        if self.script.fail_until.is_some_and(|until| now < until) {
            return Err(SourceError::Status {
                status: 502,
                body: "bad gateway".into(),
            });
        }

        // newest first; the stale record is deliberately not filtered here
        let mut records = Vec::new();
        if self.script.complete_at.is_some_and(|at| now >= at) {
            records.push(complete_row("new", Utc::now()));
        } else if self.script.row_at.is_some_and(|at| now >= at) {
            records.push(pending_row("new", Utc::now()));
        }
        if self.script.stale_complete {
            records.push(complete_row("previous", Utc::now() - chrono::Duration::hours(1)));
        }
        Ok(records)
    }
}

struct Run {
    outcome: PollOutcome,
    checks: Vec<Duration>,
    navigations: Vec<Duration>,
    finished_at: Duration,
}

async fn run(script: Script, request: PollRequest) -> Run {
    let start = Instant::now();
    let (source, calls) = ScriptedSource::new(script);
    let navigations = Arc::new(Mutex::new(Vec::new()));
    let nav_log = Arc::clone(&navigations);

    let poller = Poller::new(source, PollerSettings::default(), request);
    let outcome = poller
        .run(move |_nav| nav_log.lock().unwrap().push(start.elapsed()))
        .await;

    let checks = calls.lock().unwrap().clone();
    let navigations = navigations.lock().unwrap().clone();
    Run {
        outcome,
        checks,
        navigations,
        finished_at: start.elapsed(),
    }
}

const fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[tokio::test(start_paused = true)]
async fn first_check_waits_for_the_grace_delay_then_every_interval() {
    let result = run(
        Script {
            row_at: Some(secs(8)),
            complete_at: Some(secs(20)),
            ..Script::default()
        },
        PollRequest::fresh(OWNER),
    )
    .await;
    assert_eq!(result.checks, vec![secs(8), secs(13), secs(18), secs(23)]);
}

#[tokio::test(start_paused = true)]
async fn still_waiting_and_analyzing_at_thirty_seconds() {
    let (source, _calls) = ScriptedSource::new(Script {
        row_at: Some(secs(8)),
        ..Script::default()
    });
    let poller = Poller::new(source, PollerSettings::default(), PollRequest::fresh(OWNER));
    let rx = poller.subscribe();
    let handle = tokio::spawn(poller.run(|_| {}));

    tokio::time::sleep(secs(30)).await;
    let snapshot = *rx.borrow();
    assert_eq!(snapshot.state, PollState::Waiting);
    assert_eq!(snapshot.phase, StatusPhase::Analyzing);
    assert_eq!(
        StatusPhase::for_elapsed(secs(30), PollerSettings::default().budget),
        StatusPhase::Analyzing
    );
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn status_phase_follows_the_clock_between_checks() {
    let (source, calls) = ScriptedSource::new(Script {
        row_at: Some(secs(8)),
        ..Script::default()
    });
    let poller = Poller::new(source, PollerSettings::default(), PollRequest::fresh(OWNER));
    let rx = poller.subscribe();
    let handle = tokio::spawn(poller.run(|_| {}));

    // checks land at 58 and 63 s; the phase must not wait for the next one
    tokio::time::sleep(Duration::from_millis(61_500)).await;
    assert_eq!(*calls.lock().unwrap().last().unwrap(), secs(58));
    let snapshot = *rx.borrow();
    assert_eq!(snapshot.state, PollState::Waiting);
    assert_eq!(snapshot.phase, StatusPhase::Researching);
    assert_eq!(snapshot.elapsed, secs(61));

    tokio::time::sleep(secs(60)).await;
    assert_eq!(*calls.lock().unwrap().last().unwrap(), secs(118));
    let snapshot = *rx.borrow();
    assert_eq!(snapshot.phase, StatusPhase::Finalizing);
    assert_eq!(snapshot.elapsed, secs(121));
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn completion_at_ninety_five_seconds_is_seen_on_the_next_poll() {
    let (source, calls) = ScriptedSource::new(Script {
        row_at: Some(secs(8)),
        complete_at: Some(secs(95)),
        ..Script::default()
    });
    let start = Instant::now();
    let navigations = Arc::new(Mutex::new(Vec::new()));
    let nav_log = Arc::clone(&navigations);
    let poller = Poller::new(source, PollerSettings::default(), PollRequest::fresh(OWNER));
    let rx = poller.subscribe();
    let handle = tokio::spawn(poller.run(move |nav| {
        nav_log.lock().unwrap().push((start.elapsed(), nav));
    }));

    tokio::time::sleep(secs(95)).await;
    let just_before = *rx.borrow();
    assert_eq!(just_before.state, PollState::Waiting);
    assert_eq!(just_before.phase, StatusPhase::Researching);

    let outcome = handle.await.unwrap();
    let last_check = *calls.lock().unwrap().last().unwrap();
    assert_eq!(last_check, secs(98));
    assert!(last_check >= secs(95) && last_check <= secs(100));
    assert_eq!(rx.borrow().state, PollState::Ready);

    let navigations = navigations.lock().unwrap();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].0, secs(99));
    assert_eq!(navigations[0].1.record_id, "new");
    assert_eq!(navigations[0].1.path(), "/?email=student%40example.edu&project=new");
    assert!(matches!(outcome, PollOutcome::Ready(ref nav) if nav.record_id == "new"));
}

#[tokio::test(start_paused = true)]
async fn never_completing_fails_at_exactly_the_budget() {
    let result = run(
        Script {
            row_at: Some(secs(8)),
            ..Script::default()
        },
        PollRequest::fresh(OWNER),
    )
    .await;

    assert_eq!(result.outcome, PollOutcome::Failed { checks: 35 });
    assert_eq!(result.finished_at, secs(180));
    assert_eq!(result.checks.first(), Some(&secs(8)));
    assert_eq!(result.checks.last(), Some(&secs(178)));
    assert!(result.navigations.is_empty());
}

#[tokio::test(start_paused = true)]
async fn fetch_errors_are_swallowed() {
    let result = run(
        Script {
            complete_at: Some(Duration::ZERO),
            fail_until: Some(secs(20)),
            ..Script::default()
        },
        PollRequest::fresh(OWNER),
    )
    .await;

    assert_eq!(result.checks, vec![secs(8), secs(13), secs(18), secs(23)]);
    assert!(matches!(result.outcome, PollOutcome::Ready(_)));
    assert_eq!(result.navigations, vec![secs(24)]);
}

#[tokio::test(start_paused = true)]
async fn stale_complete_record_is_ignored_for_a_fresh_submission() {
    let result = run(
        Script {
            stale_complete: true,
            ..Script::default()
        },
        PollRequest::fresh(OWNER),
    )
    .await;

    assert!(matches!(result.outcome, PollOutcome::Failed { .. }));
    assert!(result.navigations.is_empty());
}

#[tokio::test(start_paused = true)]
async fn existing_dashboard_accepts_the_latest_record_without_grace() {
    let result = run(
        Script {
            stale_complete: true,
            ..Script::default()
        },
        PollRequest::existing(OWNER),
    )
    .await;

    assert_eq!(result.checks, vec![Duration::ZERO]);
    assert!(matches!(result.outcome, PollOutcome::Ready(ref nav) if nav.record_id == "previous"));
    assert_eq!(result.navigations, vec![secs(1)]);
}

#[tokio::test(start_paused = true)]
async fn hung_fetch_cannot_outlive_the_budget() {
    let result = run(
        Script {
            hang: true,
            ..Script::default()
        },
        PollRequest::fresh(OWNER),
    )
    .await;

    assert_eq!(result.outcome, PollOutcome::Failed { checks: 1 });
    assert_eq!(result.finished_at, secs(180));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_poller_cancels_navigation() {
    let (source, calls) = ScriptedSource::new(Script {
        complete_at: Some(Duration::ZERO),
        ..Script::default()
    });
    let navigations = Arc::new(Mutex::new(0_u32));
    let nav_count = Arc::clone(&navigations);
    let poller = Poller::new(source, PollerSettings::default(), PollRequest::fresh(OWNER));

    let cut_short = tokio::time::timeout(
        secs(5),
        poller.run(move |_| *nav_count.lock().unwrap() += 1),
    )
    .await;
    assert!(cut_short.is_err());

    tokio::time::sleep(secs(300)).await;
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(*navigations.lock().unwrap(), 0);
}
