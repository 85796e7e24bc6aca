use std::sync::Arc;

use async_trait::async_trait;
use autofill_core_types::CanonicalRecord;
use tracing::{debug, info, instrument, warn};

use crate::errors::{CandidateFailure, FetchError};
use crate::normalizer::normalize;
use crate::ports::{HttpPort, RecordSource};

/// Ordered read-side fallback.
///
/// Candidates are tried strictly one after another; the first one that
/// answers 2xx with a body the normalizer accepts wins and no later
/// candidate is contacted.
#[derive(Clone)]
pub struct EndpointResolver {
    http: Arc<dyn HttpPort>,
    candidates: Vec<String>,
}

impl EndpointResolver {
    pub fn new(http: Arc<dyn HttpPort>, candidates: Vec<String>) -> Result<Self, FetchError> {
        if candidates.is_empty() {
            return Err(FetchError::NoCandidates);
        }
        Ok(Self { http, candidates })
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    #[instrument(skip_all, fields(candidates = self.candidates.len()))]
    pub async fn resolve(&self) -> Result<CanonicalRecord, FetchError> {
        let mut failures = Vec::new();
        for (index, url) in self.candidates.iter().enumerate() {
            match self.try_candidate(url).await {
                Ok(record) => {
                    info!(
                        url = %url,
                        attempt = index + 1,
                        fields = record.present_fields().count(),
                        "grievance record resolved"
                    );
                    return Ok(record);
                }
                Err(err) => {
                    warn!(url = %url, attempt = index + 1, error = %err, "candidate failed");
                    failures.push(CandidateFailure {
                        url: url.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Err(FetchError::EndpointsExhausted {
            attempts: failures.len(),
            failures,
        })
    }

    async fn try_candidate(&self, url: &str) -> Result<CanonicalRecord, FetchError> {
        debug!(url = %url, "requesting grievance");
        let reply = self.http.get_json(url).await?;
        if !reply.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: reply.status,
            });
        }
        let payload: serde_json::Value =
            serde_json::from_str(&reply.body).map_err(|err| FetchError::Body {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        normalize(&payload)
    }
}

impl std::fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointResolver")
            .field("candidates", &self.candidates)
            .finish()
    }
}

#[async_trait]
impl RecordSource for EndpointResolver {
    async fn resolve_record(&self) -> Result<CanonicalRecord, FetchError> {
        self.resolve().await
    }
}
