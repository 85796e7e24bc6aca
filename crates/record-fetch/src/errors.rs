//! Error types for retrieval and write-back

use thiserror::Error;

/// Network-level failure of a single call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("request to {0} timed out")]
    Timeout(String),

    #[error("http client unavailable: {0}")]
    Client(String),
}

/// Why one candidate endpoint was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an unparseable body: {reason}")]
    Body { url: String, reason: String },

    #[error("response matched neither the envelope nor the flat record shape")]
    InvalidResponseShape,

    #[error("all {attempts} candidate endpoints failed")]
    EndpointsExhausted {
        attempts: usize,
        failures: Vec<CandidateFailure>,
    },

    #[error("no candidate endpoints configured")]
    NoCandidates,
}
