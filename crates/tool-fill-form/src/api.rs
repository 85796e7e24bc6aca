use std::sync::Arc;

use autofill_core_types::{CanonicalRecord, FillId, PageContext};
use field_locator::SiteMapping;

use crate::errors::FillError;
use crate::guard::FillGuard;
use crate::model::FillResult;
use crate::ports::PagePort;
use crate::runner::execute;

/// Entry point for writing a record into a page.
#[derive(Debug, Clone, Default)]
pub struct FormFiller {
    guard: Arc<FillGuard>,
}

impl FormFiller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share one guard between fillers driven by different triggers.
    pub fn with_guard(guard: Arc<FillGuard>) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &Arc<FillGuard> {
        &self.guard
    }

    /// Fill every mapped field of `record` into `page`.
    ///
    /// Refuses to start while another fill holds the same page URL. Per-field
    /// failures are recorded in the result, never returned as errors.
    pub fn fill(
        &self,
        record: CanonicalRecord,
        ctx: &PageContext,
        mapping: &SiteMapping,
        page: &dyn PagePort,
    ) -> Result<FillResult, FillError> {
        let ticket = self.guard.try_acquire(&ctx.url)?;
        Ok(execute(
            &record,
            mapping,
            page,
            FillId::new(),
            ticket.generation(),
        ))
    }
}
