//! # ideate-config
//!
//! Layered configuration loading for Ideate using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`IDEATE_*` prefix, `__` as separator)
//! 2. Project-level `.ideate/config.toml`
//! 3. User-level `~/.config/ideate/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `IDEATE_ASSISTANT__API_KEY` -> `assistant.api_key`,
//! `IDEATE_POLLER__BUDGET_SECS` -> `poller.budget_secs`, etc.
//!
//! ```no_run
//! use ideate_config::IdeateConfig;
//!
//! let config = IdeateConfig::load_with_dotenv().expect("config");
//! if config.workflow.is_configured() {
//!     println!("webhook: {}", config.workflow.webhook_url);
//! }
//! ```

mod assistant;
mod database;
mod error;
mod poller;
mod server;
mod workflow;

pub use assistant::AssistantConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use poller::PollerConfig;
pub use server::ServerConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdeateConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

impl IdeateConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the workspace root.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".ideate/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("IDEATE_").split("__"))
    }

    /// Reject values the poller and clients cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poller.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poller.interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.poller.budget_secs < self.poller.grace_secs {
            return Err(ConfigError::InvalidValue {
                field: "poller.budget_secs".into(),
                reason: format!(
                    "budget ({}s) is shorter than the grace delay ({}s)",
                    self.poller.budget_secs, self.poller.grace_secs
                ),
            });
        }
        Ok(())
    }

    /// Workflow settings, or an error when no webhook is set.
    pub fn require_workflow(&self) -> Result<&WorkflowConfig, ConfigError> {
        if self.workflow.is_configured() {
            Ok(&self.workflow)
        } else {
            Err(ConfigError::NotConfigured {
                section: "workflow".into(),
            })
        }
    }

    /// Assistant settings, or an error when no API key is set.
    pub fn require_assistant(&self) -> Result<&AssistantConfig, ConfigError> {
        if self.assistant.is_configured() {
            Ok(&self.assistant)
        } else {
            Err(ConfigError::NotConfigured {
                section: "assistant".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ideate").join("config.toml"))
    }

    /// Walk up from `CARGO_MANIFEST_DIR` (or use the current dir) looking for `.env`.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
