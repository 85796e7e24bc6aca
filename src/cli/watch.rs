use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Args;
use reconcile_poller::{ActivePage, Invitation, InvitationSink, PollerConfig, ReconciliationPoller};
use serde::Serialize;
use tokio::signal;
use tracing::{info, warn};

use crate::cli::context::CliContext;
use crate::cli::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct WatchArgs {
    /// URL of the page the user is on
    #[arg(short, long)]
    pub url: Option<String>,

    /// Delay before the first check (e.g. "30s")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub initial_delay: Option<Duration>,

    /// Time between checks (e.g. "5m")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub period: Option<Duration>,
}

struct FixedPage(Option<String>);

#[async_trait]
impl ActivePage for FixedPage {
    async fn active_url(&self) -> Option<String> {
        self.0.clone()
    }
}

struct ConsoleSink {
    output: OutputFormat,
}

#[derive(Serialize)]
struct InvitationView<'a> {
    url: &'a str,
    site: String,
    identifier: Option<&'a str>,
}

#[async_trait]
impl InvitationSink for ConsoleSink {
    async fn invite(&self, invitation: Invitation) {
        let view = InvitationView {
            url: &invitation.ctx.url,
            site: invitation.ctx.site.to_string(),
            identifier: invitation.record.identifier(),
        };
        let printed = self.output.emit(&view, || {
            println!(
                "Pending grievance {} can be filled on {}",
                view.identifier.unwrap_or("(no id)"),
                view.url
            )
        });
        if let Err(err) = printed {
            warn!(error = %err, "failed to print invitation");
        }
    }
}

/// Millisecond count for a schedule flag. Sub-millisecond remainders are
/// dropped, so a non-zero `--period` must be at least 1ms.
fn whole_millis(duration: Duration, flag: &str, non_zero: bool) -> Result<u64> {
    let millis = u64::try_from(duration.as_millis())
        .with_context(|| format!("{flag} is too large"))?;
    if non_zero && millis == 0 {
        anyhow::bail!("{flag} must be at least 1ms");
    }
    Ok(millis)
}

pub async fn cmd_watch(args: WatchArgs, ctx: &CliContext) -> Result<()> {
    let mut config: PollerConfig = ctx.config().poller.clone();
    if let Some(delay) = args.initial_delay {
        config.initial_delay_ms = whole_millis(delay, "--initial-delay", false)?;
    }
    if let Some(period) = args.period {
        config.period_ms = whole_millis(period, "--period", true)?;
    }

    let engine = ctx.engine()?;
    let poller = Arc::new(
        ReconciliationPoller::new(
            engine,
            Arc::new(FixedPage(args.url.clone())),
            Arc::new(ConsoleSink {
                output: ctx.output(),
            }),
            config,
        )
        .context("Invalid poller configuration")?,
    );

    info!(
        initial_delay = %humantime::format_duration(poller.config().initial_delay()),
        period = %humantime::format_duration(poller.config().period()),
        "Watching for pending grievances; press Ctrl-C to stop"
    );
    let handle = poller.spawn();

    signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Stopping");
    handle.shutdown().await.context("Poller task failed")?;
    Ok(())
}
