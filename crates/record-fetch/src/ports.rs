//! Transport seam.
//!
//! Resolver and reporter talk to the backend only through [`HttpPort`], so
//! they can be driven by in-memory fakes in tests and by [`crate::ReqwestHttp`]
//! in production.

use async_trait::async_trait;
use autofill_core_types::CanonicalRecord;
use serde_json::Value;

use crate::errors::{FetchError, TransportError};

/// A completed exchange. Any status code counts as completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpPort: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<HttpReply, TransportError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError>;
}

/// Anything able to produce the current pending record.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn resolve_record(&self) -> Result<CanonicalRecord, FetchError>;
}
