use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use ideate_config::IdeateConfig;
use ideate_core::entities::IdeaInput;

use crate::cli::{GlobalFlags, IngestCommands};
use crate::commands::open_store;
use crate::output::output;

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Handle `ideate ingest`: stand in for the workflow engine's writes.
pub async fn handle(
    action: &IngestCommands,
    config: &IdeateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let record = match action {
        IngestCommands::Submit { file, project } => {
            let input: IdeaInput = serde_json::from_str(&read(file)?)
                .with_context(|| format!("{} is not an idea submission", file.display()))?;
            input.validate()?;
            store
                .insert_submission(&input, project.as_deref(), Utc::now())
                .await?
        }
        IngestCommands::Refinement { id, file } => {
            store.record_refinement(id, &read(file)?).await?
        }
        IngestCommands::Research {
            id,
            file,
            citations,
        } => {
            store
                .record_market_research(id, &read(file)?, citations)
                .await?
        }
    };

    tracing::info!(
        id = %record.id,
        status = %record.status,
        complete = record.is_complete(),
        "record ingested"
    );
    output(&record, flags.format)
}
