//! Configuration types for the reconciliation poller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_KEYWORDS: [&str; 5] = ["complaint", "grievance", "register", "lodge", "file"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollerConfig {
    pub initial_delay_ms: u64,
    pub period_ms: u64,
    /// URL fragments marking a complaint-entry page.
    pub keywords: Vec<String>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 60_000,
            period_ms: 300_000,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl PollerConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}
