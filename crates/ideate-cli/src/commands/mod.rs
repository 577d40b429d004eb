pub mod ask;
pub mod export;
pub mod ingest;
pub mod projects;
pub mod schema;
pub mod seed;
pub mod serve;
pub mod wait;

use anyhow::Context;
use ideate_config::IdeateConfig;
use ideate_db::service::RecordStore;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &IdeateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Wait(args) => wait::handle(&args, config, flags).await,
        Commands::Projects(args) => projects::handle(&args, config, flags).await,
        Commands::Seed(args) => seed::handle(&args, config, flags).await,
        Commands::Ingest { action } => ingest::handle(&action, config, flags).await,
        Commands::Export(args) => export::handle(&args, config, flags).await,
        Commands::Ask(args) => ask::handle(&args, config).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}

/// Open the configured record store, creating its directory if needed.
pub(crate) async fn open_store(config: &IdeateConfig) -> anyhow::Result<RecordStore> {
    let path = &config.database.path;
    if !config.database.is_in_memory() {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
    }
    RecordStore::new_local(path)
        .await
        .with_context(|| format!("failed to open record store at {path}"))
}
