//! HTTP server settings.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Public base URL used by `ideate wait` when no `--server` is given.
fn default_public_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_url: default_public_url(),
        }
    }
}
