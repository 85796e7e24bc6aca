use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use autofill_core_types::{CanonicalRecord, PageContext};
use clap::Args;
use record_fetch::ReportOutcome;
use serde::Serialize;
use tokio::fs;
use tool_fill_form::{FieldOutcome, FillResult, MemoryPage};
use tracing::{info, warn};

use crate::cli::context::CliContext;
use crate::cli::fetch::print_record;
use crate::engine::{FetchFillOptions, RecordOrigin};

#[derive(Args, Clone, Debug)]
pub struct FillArgs {
    /// Saved page description (JSON) to fill
    #[arg(short, long, value_name = "FILE")]
    pub page: PathBuf,

    /// Page URL; defaults to the one stored in the page file
    #[arg(short, long)]
    pub url: Option<String>,

    /// Use the built-in sample record instead of contacting the backend
    #[arg(long)]
    pub sample: bool,

    /// Fall back to the sample record when the backend is unreachable
    #[arg(long, conflicts_with = "sample")]
    pub fallback_sample: bool,

    /// Skip the status write-back
    #[arg(long)]
    pub no_report: bool,

    /// Write the filled page to this file
    #[arg(long, value_name = "FILE")]
    pub save_page: Option<PathBuf>,
}

#[derive(Serialize)]
struct FillView<'a> {
    url: &'a str,
    origin: RecordOrigin,
    result: &'a FillResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ReportView>,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum ReportView {
    Delivered { url: String, attempts: usize },
    Exhausted { attempts: usize },
}

impl From<ReportOutcome> for ReportView {
    fn from(outcome: ReportOutcome) -> Self {
        match outcome {
            ReportOutcome::Delivered { url, attempts } => ReportView::Delivered { url, attempts },
            ReportOutcome::Exhausted { attempts } => ReportView::Exhausted { attempts },
        }
    }
}

pub async fn cmd_fill(args: FillArgs, ctx: &CliContext) -> Result<()> {
    let raw = fs::read_to_string(&args.page)
        .await
        .with_context(|| format!("Failed to read page file {}", args.page.display()))?;
    let page = MemoryPage::from_json_str(&raw).context("Invalid page file")?;

    let Some(url) = args.url.clone().or_else(|| page.url().map(str::to_string)) else {
        bail!("No page URL given and none stored in the page file");
    };
    let page_ctx = PageContext::from_url(url).context("Page is not on a supported site")?;

    let engine = ctx.engine()?;
    let (origin, record, result, report) = if args.sample {
        let record = CanonicalRecord::sample();
        let mount = engine.mount(&page_ctx);
        let filled = engine.fill_form(record.clone(), &page_ctx, &page);
        if mount.fresh {
            engine.unmount(&page_ctx);
        }
        let result = filled?;
        let report = (!args.no_report).then(|| engine.spawn_report(&record, &page_ctx, &result));
        (RecordOrigin::Sample, record, result, report)
    } else {
        let options = FetchFillOptions {
            fallback_sample: args.fallback_sample,
            report: !args.no_report,
        };
        let session = engine.fetch_and_fill(&page_ctx, &page, options).await?;
        (session.origin, session.record, session.result, session.report)
    };

    // the process exits after printing; let the write-back finish first
    let report = match report {
        Some(handle) => match handle.await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(error = %err, "status write-back task failed");
                None
            }
        },
        None => None,
    };

    if let Some(path) = &args.save_page {
        let snapshot = serde_json::to_string_pretty(&page.snapshot())?;
        fs::write(path, snapshot)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Filled page saved");
    }

    let view = FillView {
        url: &page_ctx.url,
        origin,
        result: &result,
        report: report.clone().map(ReportView::from),
    };
    ctx.output().emit(&view, || {
        print_record(&record, origin);
        print_result(&result);
        match &report {
            Some(ReportOutcome::Delivered { url, .. }) => println!("Status reported to {url}"),
            Some(ReportOutcome::Exhausted { .. }) => println!("Status could not be reported"),
            None => {}
        }
    })
}

fn print_result(result: &FillResult) {
    println!("Filled {}/{} fields", result.filled(), result.attempted());
    for (field, outcome) in result.outcomes() {
        let marker = match outcome {
            FieldOutcome::FilledByLocator { .. } => "+",
            FieldOutcome::NoMatch => "-",
            FieldOutcome::NoLocatorPresent => " ",
        };
        println!("  {marker} {:<20} {}", field.name(), outcome.label());
    }
}
