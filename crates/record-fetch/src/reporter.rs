//! Best-effort status write-back.

use std::sync::Arc;

use autofill_core_types::{PageContext, SiteId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::errors::FetchError;
use crate::ports::HttpPort;

pub const FORM_FILLED: &str = "form_filled";

/// Wire body posted to the write endpoints.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusReport {
    pub identifier: Option<String>,
    pub status: String,
    pub context: ReportContext,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    #[serde(serialize_with = "rfc3339_millis")]
    pub filled_at_timestamp: DateTime<Utc>,
    pub url: String,
    pub site_identifier: SiteId,
}

fn rfc3339_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl StatusReport {
    pub fn new(
        identifier: Option<&str>,
        status: impl Into<String>,
        ctx: &PageContext,
        filled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier: identifier.map(str::to_string),
            status: status.into(),
            context: ReportContext {
                filled_at_timestamp: filled_at,
                url: ctx.url.clone(),
                site_identifier: ctx.site,
            },
        }
    }

    pub fn form_filled(identifier: Option<&str>, ctx: &PageContext, filled_at: DateTime<Utc>) -> Self {
        Self::new(identifier, FORM_FILLED, ctx, filled_at)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    Delivered { url: String, attempts: usize },
    Exhausted { attempts: usize },
}

impl ReportOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, ReportOutcome::Delivered { .. })
    }
}

/// Write-side fallback. A call that completes at the transport level is
/// enough; status code and body are not looked at.
#[derive(Clone)]
pub struct StatusReporter {
    http: Arc<dyn HttpPort>,
    candidates: Vec<String>,
}

impl StatusReporter {
    pub fn new(http: Arc<dyn HttpPort>, candidates: Vec<String>) -> Result<Self, FetchError> {
        if candidates.is_empty() {
            return Err(FetchError::NoCandidates);
        }
        Ok(Self { http, candidates })
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    #[instrument(skip_all, fields(status = %report.status))]
    pub async fn report(&self, report: &StatusReport) -> ReportOutcome {
        let body = match serde_json::to_value(report) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "status report could not be encoded");
                return ReportOutcome::Exhausted { attempts: 0 };
            }
        };

        for (index, url) in self.candidates.iter().enumerate() {
            match self.http.post_json(url, &body).await {
                Ok(reply) => {
                    info!(url = %url, http_status = reply.status, "status reported");
                    return ReportOutcome::Delivered {
                        url: url.clone(),
                        attempts: index + 1,
                    };
                }
                Err(err) => warn!(url = %url, error = %err, "status endpoint failed"),
            }
        }

        warn!(
            attempts = self.candidates.len(),
            "status update failed on every endpoint"
        );
        ReportOutcome::Exhausted {
            attempts: self.candidates.len(),
        }
    }

    /// Detach the report from the caller. Requires a running tokio runtime.
    pub fn spawn_report(&self, report: StatusReport) -> JoinHandle<ReportOutcome> {
        let reporter = self.clone();
        tokio::spawn(async move { reporter.report(&report).await })
    }
}

impl std::fmt::Debug for StatusReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusReporter")
            .field("candidates", &self.candidates)
            .finish()
    }
}
