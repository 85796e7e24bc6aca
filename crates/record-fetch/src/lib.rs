//! Grievance retrieval and status write-back
//!
//! - Response normalization of heterogeneous backend payloads
//! - Sequential, ordered fallback across candidate read endpoints
//! - Best-effort status write-back across candidate write endpoints
//! - A reqwest-backed transport behind the [`HttpPort`] seam

pub mod config;
pub mod errors;
pub mod http;
pub mod normalizer;
pub mod ports;
pub mod reporter;
pub mod resolver;

pub use config::EndpointConfig;
pub use errors::{CandidateFailure, FetchError, TransportError};
pub use http::ReqwestHttp;
pub use normalizer::normalize;
pub use ports::{HttpPort, HttpReply, RecordSource};
pub use reporter::{ReportOutcome, StatusReport, StatusReporter};
pub use resolver::EndpointResolver;
