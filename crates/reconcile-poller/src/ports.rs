use async_trait::async_trait;
use autofill_core_types::{CanonicalRecord, PageContext};

pub use record_fetch::RecordSource;

/// Read-only view of the page the user is currently on.
#[async_trait]
pub trait ActivePage: Send + Sync {
    async fn active_url(&self) -> Option<String>;
}

/// A pending record and the page it could be filled into.
#[derive(Clone, Debug, PartialEq)]
pub struct Invitation {
    pub record: CanonicalRecord,
    pub ctx: PageContext,
}

/// Surfaces the fill invitation to the user. Must not touch the page.
#[async_trait]
pub trait InvitationSink: Send + Sync {
    async fn invite(&self, invitation: Invitation);
}
