//! Language-model endpoint used by the chat assistant.
//!
//! Any OpenAI-compatible chat-completions API works; the defaults point at
//! Groq. Sampling settings are not configurable and live with the client.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

/// Characters of dashboard context forwarded with each question.
const fn default_context_max_chars() -> usize {
    6000
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the endpoint.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_context_max_chars")]
    pub context_max_chars: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            context_max_chars: default_context_max_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AssistantConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }
}
