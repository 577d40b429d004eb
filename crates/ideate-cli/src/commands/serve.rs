use anyhow::Context;
use ideate_config::IdeateConfig;
use ideate_server::AppState;

use crate::cli::ServeArgs;

/// Handle `ideate serve`.
pub async fn handle(args: &ServeArgs, config: &IdeateConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)
        .await
        .context("failed to initialize server state")?;
    let bind = args.bind.as_deref().unwrap_or(&config.server.bind);
    ideate_server::serve(state, bind)
        .await
        .with_context(|| format!("server on {bind} failed"))
}
