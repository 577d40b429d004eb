//! External workflow engine (form-response webhook).

use serde::{Deserialize, Serialize};

fn default_user_agent() -> String {
    "InspirAI Custom Form".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Webhook that receives form-response envelopes.
    #[serde(default)]
    pub webhook_url: String,

    /// `User-Agent` header sent with each submission.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WorkflowConfig {
    pub fn is_configured(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}
