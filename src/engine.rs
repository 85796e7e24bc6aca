//! Engine facade.
//!
//! Wires retrieval, mapping, filling and write-back together behind the
//! entry points a trigger calls: [`GrievanceEngine::resolve_record`],
//! [`GrievanceEngine::fill_form`] and [`GrievanceEngine::report_status`].
//! Manual and poller triggers end up in the same fill path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use autofill_core_types::{CanonicalRecord, PageContext};
use field_locator::FieldMappingTable;
use parking_lot::Mutex;
use record_fetch::{
    EndpointResolver, FetchError, HttpPort, RecordSource, ReportOutcome, ReqwestHttp,
    StatusReport, StatusReporter,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tool_fill_form::{FillError, FillResult, FormFiller, PagePort};
use tracing::{info, warn};

use crate::config::Config;

/// Context attached when no record could be resolved.
pub(crate) const NO_RECORD: &str = concat!(
    "No grievance record available; ",
    "rerun with --fallback-sample (or --sample for fill) to use the built-in sample record"
);

/// Where the record handed to the filler came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Backend,
    Sample,
}

/// Result of a mount request for one page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mount {
    pub generation: u64,
    /// False when the page was already mounted.
    pub fresh: bool,
}

#[derive(Debug, Default)]
struct MountRegistry {
    next: AtomicU64,
    pages: Mutex<HashMap<String, u64>>,
}

impl MountRegistry {
    fn mount(&self, url: &str) -> Mount {
        let mut pages = self.pages.lock();
        if let Some(generation) = pages.get(url) {
            return Mount {
                generation: *generation,
                fresh: false,
            };
        }
        let generation = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        pages.insert(url.to_string(), generation);
        Mount {
            generation,
            fresh: true,
        }
    }

    fn unmount(&self, url: &str) -> bool {
        self.pages.lock().remove(url).is_some()
    }
}

/// Options for [`GrievanceEngine::fetch_and_fill`].
#[derive(Clone, Copy, Debug)]
pub struct FetchFillOptions {
    /// Use [`CanonicalRecord::sample`] when every read endpoint fails.
    pub fallback_sample: bool,
    pub report: bool,
}

impl Default for FetchFillOptions {
    fn default() -> Self {
        Self {
            fallback_sample: false,
            report: true,
        }
    }
}

/// Everything one fetch-and-fill produced.
#[derive(Debug)]
pub struct FillSession {
    pub origin: RecordOrigin,
    pub record: CanonicalRecord,
    pub result: FillResult,
    /// Detached write-back, when one was started.
    pub report: Option<JoinHandle<ReportOutcome>>,
}

pub struct GrievanceEngine {
    resolver: EndpointResolver,
    reporter: StatusReporter,
    mappings: Arc<FieldMappingTable>,
    filler: FormFiller,
    status_token: String,
    mounts: MountRegistry,
}

impl GrievanceEngine {
    /// Build against the real backend described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http =
            ReqwestHttp::new(config.backend.timeout()).context("Failed to build HTTP client")?;
        Self::with_http(Arc::new(http), config)
    }

    pub fn with_http(http: Arc<dyn HttpPort>, config: &Config) -> Result<Self> {
        let resolver = EndpointResolver::new(http.clone(), config.backend.read_urls())
            .context("Invalid read endpoint configuration")?;
        let reporter = StatusReporter::new(http, config.backend.write_urls())
            .context("Invalid write endpoint configuration")?;
        Ok(Self {
            resolver,
            reporter,
            mappings: Arc::new(config.mapping_table()),
            filler: FormFiller::new(),
            status_token: config.status_token.clone(),
            mounts: MountRegistry::default(),
        })
    }

    pub fn mappings(&self) -> &FieldMappingTable {
        &self.mappings
    }

    pub async fn resolve_record(&self) -> Result<CanonicalRecord, FetchError> {
        self.resolver.resolve().await
    }

    /// Resolve, substituting the sample record on total read failure when
    /// `fallback_sample` is set.
    pub async fn resolve_or_sample(
        &self,
        fallback_sample: bool,
    ) -> Result<(CanonicalRecord, RecordOrigin), FetchError> {
        match self.resolver.resolve().await {
            Ok(record) => Ok((record, RecordOrigin::Backend)),
            Err(err @ FetchError::EndpointsExhausted { .. }) if fallback_sample => {
                warn!(error = %err, "backend unavailable; using sample record");
                Ok((CanonicalRecord::sample(), RecordOrigin::Sample))
            }
            Err(err) => Err(err),
        }
    }

    /// Fill `record` into `page` using the locator table for `ctx.site`.
    pub fn fill_form(
        &self,
        record: CanonicalRecord,
        ctx: &PageContext,
        page: &dyn PagePort,
    ) -> Result<FillResult, FillError> {
        let mapping = self.mappings.for_site(ctx.site);
        let result = self.filler.fill(record, ctx, mapping, page)?;
        info!(
            url = %ctx.url,
            site = %ctx.site,
            attempted = result.attempted(),
            filled = result.filled(),
            "Form fill finished"
        );
        Ok(result)
    }

    fn status_report(
        &self,
        record: &CanonicalRecord,
        ctx: &PageContext,
        result: &FillResult,
    ) -> StatusReport {
        StatusReport::new(
            record.identifier(),
            self.status_token.clone(),
            ctx,
            result.finished_at,
        )
    }

    /// Write the fill outcome back, waiting for the fallback walk to end.
    pub async fn report_status(
        &self,
        record: &CanonicalRecord,
        ctx: &PageContext,
        result: &FillResult,
    ) -> ReportOutcome {
        self.reporter
            .report(&self.status_report(record, ctx, result))
            .await
    }

    /// Fire-and-forget variant of [`Self::report_status`].
    pub fn spawn_report(
        &self,
        record: &CanonicalRecord,
        ctx: &PageContext,
        result: &FillResult,
    ) -> JoinHandle<ReportOutcome> {
        self.reporter
            .spawn_report(self.status_report(record, ctx, result))
    }

    /// Register a page; repeated mounts of the same URL are no-ops.
    pub fn mount(&self, ctx: &PageContext) -> Mount {
        let mount = self.mounts.mount(&ctx.url);
        if mount.fresh {
            info!(url = %ctx.url, generation = mount.generation, "Page mounted");
        }
        mount
    }

    pub fn unmount(&self, ctx: &PageContext) -> bool {
        self.mounts.unmount(&ctx.url)
    }

    /// Manual trigger: resolve, fill, then detach the write-back.
    ///
    /// Mounts the page for the duration of the call. A mount the caller made
    /// beforehand is left in place; one made here is released on return.
    pub async fn fetch_and_fill(
        &self,
        ctx: &PageContext,
        page: &dyn PagePort,
        options: FetchFillOptions,
    ) -> Result<FillSession> {
        let mount = self.mount(ctx);
        let session = self.fill_mounted(ctx, page, options).await;
        if mount.fresh {
            self.unmount(ctx);
        }
        session
    }

    async fn fill_mounted(
        &self,
        ctx: &PageContext,
        page: &dyn PagePort,
        options: FetchFillOptions,
    ) -> Result<FillSession> {
        let (record, origin) = self
            .resolve_or_sample(options.fallback_sample)
            .await
            .context(NO_RECORD)?;
        let result = self.fill_form(record.clone(), ctx, page)?;
        let report = options
            .report
            .then(|| self.spawn_report(&record, ctx, &result));
        Ok(FillSession {
            origin,
            record,
            result,
            report,
        })
    }
}

#[async_trait]
impl RecordSource for GrievanceEngine {
    async fn resolve_record(&self) -> Result<CanonicalRecord, FetchError> {
        self.resolver.resolve().await
    }
}
