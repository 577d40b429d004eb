use std::time::Duration;

use ideate_config::PollerConfig;

/// Poller timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    pub grace: Duration,
    pub interval: Duration,
    pub budget: Duration,
    pub redirect_delay: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self::from(&PollerConfig::default())
    }
}

impl From<&PollerConfig> for PollerSettings {
    fn from(config: &PollerConfig) -> Self {
        Self {
            grace: Duration::from_secs(config.grace_secs),
            interval: Duration::from_secs(config.interval_secs.max(1)),
            budget: Duration::from_secs(config.budget_secs),
            redirect_delay: Duration::from_secs(config.redirect_delay_secs),
        }
    }
}
