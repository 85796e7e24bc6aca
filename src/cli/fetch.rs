use anyhow::{Context, Result};
use autofill_core_types::CanonicalRecord;
use clap::Args;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::engine::{RecordOrigin, NO_RECORD};

#[derive(Args, Clone, Debug)]
pub struct FetchArgs {
    /// Fall back to the built-in sample record when the backend is unreachable
    #[arg(long)]
    pub fallback_sample: bool,
}

#[derive(Serialize)]
struct FetchView<'a> {
    origin: RecordOrigin,
    record: &'a CanonicalRecord,
}

pub async fn cmd_fetch(args: FetchArgs, ctx: &CliContext) -> Result<()> {
    let engine = ctx.engine()?;
    let (record, origin) = engine
        .resolve_or_sample(args.fallback_sample)
        .await
        .context(NO_RECORD)?;

    let view = FetchView {
        origin,
        record: &record,
    };
    ctx.output().emit(&view, || print_record(&record, origin))
}

pub(crate) fn print_record(record: &CanonicalRecord, origin: RecordOrigin) {
    match origin {
        RecordOrigin::Backend => println!("Grievance from backend"),
        RecordOrigin::Sample => println!("Sample grievance (backend unavailable)"),
    }
    if let Some(identifier) = record.identifier() {
        println!("  {:<20} {}", "identifier", identifier);
    }
    for (field, value) in record.present_fields() {
        println!("  {:<20} {}", field.name(), value);
    }
}
