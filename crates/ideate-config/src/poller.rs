//! Dashboard poller timings, in seconds.

use serde::{Deserialize, Serialize};

const fn default_grace_secs() -> u64 {
    8
}

const fn default_interval_secs() -> u64 {
    5
}

const fn default_budget_secs() -> u64 {
    180
}

const fn default_redirect_delay_secs() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollerConfig {
    /// Delay before the first check after a fresh submission.
    #[serde(default = "default_grace_secs")]
    pub grace_secs: u64,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Total time before the poller gives up.
    #[serde(default = "default_budget_secs")]
    pub budget_secs: u64,

    /// Pause between reaching `ready` and navigating.
    #[serde(default = "default_redirect_delay_secs")]
    pub redirect_delay_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            grace_secs: default_grace_secs(),
            interval_secs: default_interval_secs(),
            budget_secs: default_budget_secs(),
            redirect_delay_secs: default_redirect_delay_secs(),
        }
    }
}
