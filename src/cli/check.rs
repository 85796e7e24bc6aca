use anyhow::Result;
use clap::Args;
use reconcile_poller::Eligibility;
use serde::Serialize;

use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Page URL to evaluate
    pub url: String,
}

#[derive(Serialize)]
struct CheckView<'a> {
    url: &'a str,
    eligibility: Eligibility,
    message: &'static str,
}

pub fn cmd_check(args: CheckArgs, ctx: &CliContext) -> Result<()> {
    let eligibility = Eligibility::evaluate(&args.url, &ctx.config().poller.keywords);
    let view = CheckView {
        url: &args.url,
        eligibility,
        message: eligibility.describe(),
    };
    ctx.output().emit(&view, || match eligibility {
        Eligibility::Eligible(site) | Eligibility::SupportedSite(site) => {
            println!("{} ({site}): {}", args.url, eligibility.describe())
        }
        Eligibility::Unsupported => println!("{}: {}", args.url, eligibility.describe()),
    })
}
