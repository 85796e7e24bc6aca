use super::check::cmd_check;
use super::env::CliArgs;
use super::fetch::cmd_fetch;
use super::fill::cmd_fill;
use super::mappings::cmd_mappings;
use super::watch::cmd_watch;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Fetch(args) => cmd_fetch(args, ctx).await,
        Commands::Fill(args) => cmd_fill(args, ctx).await,
        Commands::Check(args) => cmd_check(args, ctx),
        Commands::Watch(args) => cmd_watch(args, ctx).await,
        Commands::Mappings(args) => cmd_mappings(args, ctx),
    }
}
