//! Reconciliation poller.
//!
//! On a fixed schedule, checks whether a pending grievance exists and, when
//! the user is sitting on a complaint-entry page of a supported site, raises
//! an invitation to fill it. The poller never writes to the page and keeps no
//! record between ticks.

pub mod config;
pub mod eligibility;
pub mod errors;
pub mod ports;

use std::sync::Arc;

use autofill_core_types::{PageContext, SiteId};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub use crate::config::PollerConfig;
pub use crate::eligibility::Eligibility;
pub use crate::errors::PollError;
pub use crate::ports::{ActivePage, Invitation, InvitationSink, RecordSource};

/// What a single tick concluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Retrieval failed or produced an empty record.
    NoRecord,
    NoActivePage,
    Ineligible(Eligibility),
    Invited(SiteId),
}

pub struct ReconciliationPoller {
    source: Arc<dyn RecordSource>,
    page: Arc<dyn ActivePage>,
    sink: Arc<dyn InvitationSink>,
    config: PollerConfig,
}

/// Handle returned by [`ReconciliationPoller::spawn`] for lifecycle control.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop the schedule and wait for an in-progress tick to finish.
    pub async fn shutdown(mut self) -> Result<(), tokio::task::JoinError> {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            match task.await {
                Ok(_) => Ok(()),
                Err(err) if err.is_cancelled() => Ok(()),
                Err(err) => Err(err),
            }
        } else {
            Ok(())
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl ReconciliationPoller {
    pub fn new(
        source: Arc<dyn RecordSource>,
        page: Arc<dyn ActivePage>,
        sink: Arc<dyn InvitationSink>,
        config: PollerConfig,
    ) -> Result<Self, PollError> {
        if config.period_ms == 0 {
            return Err(PollError::ZeroPeriod);
        }
        if config.keywords.iter().all(|keyword| keyword.trim().is_empty()) {
            return Err(PollError::NoKeywords);
        }
        Ok(Self {
            source,
            page,
            sink,
            config,
        })
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Run one reconciliation pass.
    pub async fn tick(&self) -> TickOutcome {
        let record = match self.source.resolve_record().await {
            Ok(record) if !record.is_empty() => record,
            Ok(_) => {
                debug!("backend returned an empty record");
                return TickOutcome::NoRecord;
            }
            Err(err) => {
                debug!(error = %err, "no pending grievance");
                return TickOutcome::NoRecord;
            }
        };

        let Some(url) = self.page.active_url().await else {
            debug!("no active page");
            return TickOutcome::NoActivePage;
        };

        match Eligibility::evaluate(&url, &self.config.keywords) {
            Eligibility::Eligible(site) => {
                info!(url = %url, site = %site, "pending grievance; inviting fill");
                self.sink
                    .invite(Invitation {
                        record,
                        ctx: PageContext::new(url, site),
                    })
                    .await;
                TickOutcome::Invited(site)
            }
            verdict => {
                debug!(url = %url, verdict = verdict.describe(), "page not eligible");
                TickOutcome::Ineligible(verdict)
            }
        }
    }

    /// Start the schedule: first tick after `initial_delay`, then every
    /// `period`. Late ticks are skipped rather than bunched.
    pub fn spawn(self: &Arc<Self>) -> PollerHandle {
        let poller = Arc::clone(self);
        let cancel = CancellationToken::new();
        let loop_token = cancel.clone();
        let start = Instant::now() + self.config.initial_delay();
        let period = self.config.period();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => {
                        break;
                    }
                    _ = ticker.tick() => {
                        let outcome = poller.tick().await;
                        debug!(?outcome, "poll tick finished");
                    }
                }
            }
            info!("reconciliation poller stopped");
        });
        PollerHandle {
            cancel,
            task: Some(task),
        }
    }
}
