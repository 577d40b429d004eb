use chrono::Utc;
use ideate_config::IdeateConfig;
use ideate_core::sample::sample_record;

use crate::cli::{GlobalFlags, SeedArgs};
use crate::commands::open_store;
use crate::output::output;

/// Handle `ideate seed`.
pub async fn handle(
    args: &SeedArgs,
    config: &IdeateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let record = sample_record(args.email.trim(), Utc::now());
    store.import_record(&record).await?;
    tracing::info!(id = %record.id, owner = %record.owner, "sample record seeded");
    output(&record, flags.format)
}
