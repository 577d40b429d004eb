//! The polling loop.
//!
//! One [`Poller`] serves one dashboard visit. It is consumed by [`Poller::run`],
//! so it can reach `ready` at most once and navigates at most once. Dropping
//! the `run` future cancels polling; a retry after `failed` is a new poller.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep, sleep_until, timeout_at};

use ideate_core::completion;
use ideate_core::entities::AnalysisRecord;

use crate::settings::PollerSettings;
use crate::source::RecordSource;
use crate::state::{PollSnapshot, PollState, StatusPhase};

const PUBLISH_EVERY: Duration = Duration::from_secs(1);

/// What to wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    pub owner: String,
    /// A submission was just made: apply the grace delay and ignore records
    /// created before the poller started.
    pub fresh: bool,
    /// Track exactly this record instead of the earliest new one.
    pub tracked_id: Option<String>,
}

impl PollRequest {
    #[must_use]
    pub fn fresh(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            fresh: true,
            tracked_id: None,
        }
    }

    #[must_use]
    pub fn existing(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            fresh: false,
            tracked_id: None,
        }
    }
}

/// Where to send the user once the analysis is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub owner: String,
    pub record_id: String,
    pub project: Option<String>,
}

impl Navigation {
    fn for_record(record: &AnalysisRecord) -> Self {
        Self {
            owner: record.owner.clone(),
            record_id: record.id.clone(),
            project: record.project.clone(),
        }
    }

    /// Dashboard path for this record.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "/?email={}&project={}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.record_id)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready(Navigation),
    Failed { checks: u32 },
}

pub struct Poller<S> {
    source: S,
    settings: PollerSettings,
    request: PollRequest,
    state: PollState,
    checks: u32,
    started: Instant,
    tx: watch::Sender<PollSnapshot>,
}

impl<S: RecordSource> Poller<S> {
    #[must_use]
    pub fn new(source: S, settings: PollerSettings, request: PollRequest) -> Self {
        let (tx, _rx) = watch::channel(PollSnapshot::initial());
        Self {
            source,
            settings,
            request,
            state: PollState::Waiting,
            checks: 0,
            started: Instant::now(),
            tx,
        }
    }

    /// Receive a snapshot on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.tx.subscribe()
    }

    /// Poll until the tracked record is complete or the budget runs out.
    ///
    /// `navigate` is called exactly once, `redirect_delay` after reaching
    /// `ready`, and never on failure.
    pub async fn run<F>(mut self, navigate: F) -> PollOutcome
    where
        F: FnOnce(Navigation) + Send,
    {
        self.started = Instant::now();
        let deadline = self.started + self.settings.budget;
        let since = self.request.fresh.then(Utc::now);
        self.publish();

        tracing::info!(
            owner = %self.request.owner,
            fresh = self.request.fresh,
            budget_secs = self.settings.budget.as_secs(),
            "waiting for analysis"
        );

        if self.request.fresh {
            self.idle_until(deadline.min(self.started + self.settings.grace)).await;
        }

        let mut next_check = Instant::now();
        loop {
            if Instant::now() >= deadline {
                return self.fail();
            }

            self.transition(PollState::FreshCheck);
            self.checks += 1;
            match timeout_at(deadline, self.source.records(&self.request.owner, since)).await {
                Err(_) => return self.fail(),
                Ok(Ok(records)) => {
                    if let Some(record) = self.complete_record(&records, since) {
                        let nav = Navigation::for_record(record);
                        return self.ready(nav, navigate).await;
                    }
                    tracing::debug!(
                        checks = self.checks,
                        candidates = records.len(),
                        "analysis not complete yet"
                    );
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        error = %e,
                        checks = self.checks,
                        "completion check failed, will retry"
                    );
                }
            }
            self.transition(PollState::Waiting);

            next_check += self.settings.interval;
            if next_check >= deadline {
                self.idle_until(deadline).await;
                return self.fail();
            }
            self.idle_until(next_check).await;
        }
    }

    /// Sleep until `at`, re-publishing every second so the status phase
    /// follows elapsed time between checks.
    async fn idle_until(&self, at: Instant) {
        let mut ticks = interval_at(self.started + PUBLISH_EVERY, PUBLISH_EVERY);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let wake = sleep_until(at);
        tokio::pin!(wake);
        loop {
            tokio::select! {
                biased;
                () = &mut wake => return,
                _ = ticks.tick() => self.publish(),
            }
        }
    }

    fn complete_record<'a>(
        &self,
        records: &'a [AnalysisRecord],
        since: Option<DateTime<Utc>>,
    ) -> Option<&'a AnalysisRecord> {
        completion::select_candidate(records, since, self.request.tracked_id.as_deref())
            .filter(|r| completion::is_complete(r))
    }

    async fn ready<F>(mut self, nav: Navigation, navigate: F) -> PollOutcome
    where
        F: FnOnce(Navigation) + Send,
    {
        self.transition(PollState::Ready);
        tracing::info!(
            record_id = %nav.record_id,
            checks = self.checks,
            elapsed_secs = self.started.elapsed().as_secs(),
            "analysis ready"
        );
        sleep(self.settings.redirect_delay).await;
        navigate(nav.clone());
        PollOutcome::Ready(nav)
    }

    fn fail(mut self) -> PollOutcome {
        self.transition(PollState::Failed);
        tracing::warn!(
            owner = %self.request.owner,
            checks = self.checks,
            "analysis did not complete within the budget"
        );
        PollOutcome::Failed {
            checks: self.checks,
        }
    }

    fn transition(&mut self, next: PollState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "poller cannot move from {} to {next}",
            self.state
        );
        self.state = next;
        self.publish();
    }

    fn publish(&self) {
        let elapsed = self.started.elapsed();
        self.tx.send_replace(PollSnapshot {
            state: self.state,
            phase: StatusPhase::for_elapsed(elapsed, self.settings.budget),
            elapsed,
            checks: self.checks,
        });
    }
}
