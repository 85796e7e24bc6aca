use std::collections::BTreeMap;

use autofill_core_types::{CanonicalField, FillId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-field diagnostic tag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Written through the locator at 1-based position `rank` of the chain.
    FilledByLocator { rank: usize, locator: String },
    /// Every configured locator failed to resolve or accept the value.
    NoMatch,
    /// The field has a value but the site mapping configures no locator for it.
    NoLocatorPresent,
}

impl FieldOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, FieldOutcome::FilledByLocator { .. })
    }

    pub fn counts_as_attempted(&self) -> bool {
        !matches!(self, FieldOutcome::NoLocatorPresent)
    }

    pub fn label(&self) -> String {
        match self {
            FieldOutcome::FilledByLocator { rank, .. } => format!("filled-by-locator-{rank}"),
            FieldOutcome::NoMatch => "no-match".into(),
            FieldOutcome::NoLocatorPresent => "no-locator-present".into(),
        }
    }
}

/// Summary of one fill invocation.
///
/// Counters are only moved through [`FillResult::record`], which keeps
/// `filled <= attempted`.
#[derive(Clone, Debug, Serialize)]
pub struct FillResult {
    pub fill_id: FillId,
    pub generation: u64,
    attempted: usize,
    filled: usize,
    outcomes: BTreeMap<CanonicalField, FieldOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl FillResult {
    pub fn new(fill_id: FillId, generation: u64) -> Self {
        let now = Utc::now();
        Self {
            fill_id,
            generation,
            attempted: 0,
            filled: 0,
            outcomes: BTreeMap::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn record(&mut self, field: CanonicalField, outcome: FieldOutcome) {
        if let Some(previous) = self.outcomes.remove(&field) {
            self.attempted -= usize::from(previous.counts_as_attempted());
            self.filled -= usize::from(previous.is_filled());
        }
        self.attempted += usize::from(outcome.counts_as_attempted());
        self.filled += usize::from(outcome.is_filled());
        self.outcomes.insert(field, outcome);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn outcome(&self, field: CanonicalField) -> Option<&FieldOutcome> {
        self.outcomes.get(&field)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (CanonicalField, &FieldOutcome)> {
        self.outcomes.iter().map(|(field, outcome)| (*field, outcome))
    }

    /// Every attempted field was written.
    pub fn is_complete(&self) -> bool {
        self.filled == self.attempted
    }
}
