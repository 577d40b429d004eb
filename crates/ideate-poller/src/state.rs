//! Poller states and the elapsed-time status line.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

// ---------------------------------------------------------------------------
// PollState
// ---------------------------------------------------------------------------

/// Where the poller is in its cycle.
///
/// ```text
/// waiting ⇄ fresh_check → ready
///    └──────────────────→ failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollState {
    #[default]
    Waiting,
    FreshCheck,
    Ready,
    Failed,
}

impl PollState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Waiting => &[Self::FreshCheck, Self::Failed],
            Self::FreshCheck => &[Self::Waiting, Self::Ready, Self::Failed],
            Self::Ready | Self::Failed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::FreshCheck => "fresh_check",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatusPhase
// ---------------------------------------------------------------------------

/// Progress line shown while waiting. Each phase covers a third of the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    Analyzing,
    Researching,
    Finalizing,
    TimedOut,
}

impl StatusPhase {
    /// Phase for `elapsed` under `budget`: `[0, b/3)` analyzing,
    /// `[b/3, 2b/3)` researching, `[2b/3, b)` finalizing, `≥ b` timed out.
    #[must_use]
    pub fn for_elapsed(elapsed: Duration, budget: Duration) -> Self {
        if elapsed >= budget {
            Self::TimedOut
        } else if elapsed * 3 >= budget * 2 {
            Self::Finalizing
        } else if elapsed * 3 >= budget {
            Self::Researching
        } else {
            Self::Analyzing
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Analyzing => "🤖 AI is analyzing your idea...",
            Self::Researching => "📊 Researching market trends and competitors...",
            Self::Finalizing => "🔍 Finalizing market research...",
            Self::TimedOut => "⏱️ Analysis is taking longer than expected. Please try again.",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyzing => "analyzing",
            Self::Researching => "researching",
            Self::Finalizing => "finalizing",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for StatusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published on every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollSnapshot {
    pub state: PollState,
    pub phase: StatusPhase,
    pub elapsed: Duration,
    /// Completion checks issued so far.
    pub checks: u32,
}

impl PollSnapshot {
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            state: PollState::Waiting,
            phase: StatusPhase::Analyzing,
            elapsed: Duration::ZERO,
            checks: 0,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.state {
            PollState::Ready => "✅ Analysis complete! Opening your dashboard...",
            PollState::Failed => StatusPhase::TimedOut.message(),
            PollState::Waiting | PollState::FreshCheck => self.phase.message(),
        }
    }
}
