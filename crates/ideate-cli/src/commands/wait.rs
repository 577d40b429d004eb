use anyhow::Context;
use ideate_config::IdeateConfig;
use ideate_poller::{HttpRecordSource, PollOutcome, PollRequest, Poller, PollerSettings};

use crate::cli::{GlobalFlags, WaitArgs};
use crate::output::output;

/// Handle `ideate wait`: run the dashboard poller against a running server.
pub async fn handle(
    args: &WaitArgs,
    config: &IdeateConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let base_url = args.server.as_deref().unwrap_or(&config.server.public_url);
    let http = reqwest::Client::builder()
        .user_agent(concat!("ideate-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let mut request = if args.fresh {
        PollRequest::fresh(&args.email)
    } else {
        PollRequest::existing(&args.email)
    };
    request.tracked_id.clone_from(&args.id);

    let poller = Poller::new(
        HttpRecordSource::new(http, base_url),
        PollerSettings::from(&config.poller),
        request,
    );

    let mut updates = poller.subscribe();
    let quiet = flags.quiet;
    let progress = tokio::spawn(async move {
        let mut last = "";
        while updates.changed().await.is_ok() {
            let snapshot = *updates.borrow_and_update();
            let message = snapshot.message();
            if !quiet && message != last {
                eprintln!("{message}");
                last = message;
            }
            if snapshot.state.is_terminal() {
                break;
            }
        }
    });

    let outcome = poller
        .run(|nav| tracing::info!(path = %nav.path(), "navigating to dashboard"))
        .await;
    progress.abort();

    match outcome {
        PollOutcome::Ready(nav) => {
            output(&nav, flags.format)?;
            println!("{base_url}{}", nav.path());
            Ok(())
        }
        PollOutcome::Failed { checks } => {
            anyhow::bail!("analysis did not complete within the time budget ({checks} checks)")
        }
    }
}
