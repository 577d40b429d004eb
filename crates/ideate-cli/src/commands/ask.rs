use ideate_config::IdeateConfig;
use ideate_core::context::{DashboardContext, cap_context};
use ideate_relay::AssistantClient;

use crate::cli::AskArgs;
use crate::commands::open_store;

/// Handle `ideate ask`: the chat panel, from a terminal.
pub async fn handle(args: &AskArgs, config: &IdeateConfig) -> anyhow::Result<()> {
    let assistant_config = config.require_assistant()?;
    let store = open_store(config).await?;

    let context = store
        .get_for_dashboard(&args.owner.email, args.owner.project.as_deref())
        .await?
        .map(|record| DashboardContext::from_record(&record).render());
    if context.is_none() {
        tracing::warn!(
            owner = %args.owner.email,
            "no analysis found; asking without dashboard data"
        );
    }
    let context = context
        .as_deref()
        .map(|ctx| cap_context(ctx, assistant_config.context_max_chars));

    let client = AssistantClient::new(assistant_config)?;
    let reply = client.ask(&args.question, context).await?;
    println!("{reply}");
    Ok(())
}
