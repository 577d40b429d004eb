use anyhow::Context;
use ideate_config::IdeateConfig;
use ideate_core::export::ExportDocument;

use crate::cli::{ExportArgs, GlobalFlags};
use crate::commands::open_store;
use crate::output::{output, render};

/// Handle `ideate export`.
pub async fn handle(
    args: &ExportArgs,
    config: &IdeateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let record = store
        .get_for_dashboard(&args.owner.email, args.owner.project.as_deref())
        .await?
        .with_context(|| format!("no analysis found for {}", args.owner.email))?;
    let document = ExportDocument::from_record(&record);

    let Some(dir) = &args.out_dir else {
        return output(&document, flags.format);
    };
    let path = dir.join(document.file_name());
    std::fs::write(&path, render(&document, flags.format)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}
