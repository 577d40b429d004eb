//! Errors raised while loading or checking `IdeateConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `IDEATE_*` variable could not be merged or parsed.
    #[error("cannot load ideate configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A command needs a section that has no webhook or API key set.
    #[error("'{section}' is not set up; add it to .ideate/config.toml or the IDEATE_* environment")]
    NotConfigured { section: String },

    /// A value parsed but the poller or a client cannot run with it.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
