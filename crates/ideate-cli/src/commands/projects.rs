use ideate_config::IdeateConfig;

use crate::cli::{GlobalFlags, OwnerArgs};
use crate::commands::open_store;
use crate::output::output;

/// Handle `ideate projects`.
pub async fn handle(
    args: &OwnerArgs,
    config: &IdeateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let projects = store.list_projects(&args.email).await?;
    output(&projects, flags.format)
}
