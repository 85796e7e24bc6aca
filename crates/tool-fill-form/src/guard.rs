//! Overlap guard for fills against the same page.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use crate::errors::FillError;

/// Hands out one ticket per page at a time, each stamped with a
/// monotonically increasing generation.
#[derive(Debug, Default)]
pub struct FillGuard {
    next_generation: AtomicU64,
    active: Mutex<HashMap<String, u64>>,
}

impl FillGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, page_key: &str) -> Result<FillTicket<'_>, FillError> {
        let mut active = self.active.lock();
        if let Some(generation) = active.get(page_key) {
            return Err(FillError::InProgress {
                page: page_key.to_string(),
                generation: *generation,
            });
        }
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        active.insert(page_key.to_string(), generation);
        debug!(page = page_key, generation, "fill ticket issued");
        Ok(FillTicket {
            guard: self,
            page_key: page_key.to_string(),
            generation,
        })
    }

    /// Generation of the most recent ticket, 0 before the first.
    pub fn latest_generation(&self) -> u64 {
        self.next_generation.load(Ordering::SeqCst)
    }

    pub fn is_active(&self, page_key: &str) -> bool {
        self.active.lock().contains_key(page_key)
    }
}

/// Released on drop.
#[derive(Debug)]
pub struct FillTicket<'a> {
    guard: &'a FillGuard,
    page_key: String,
    generation: u64,
}

impl FillTicket<'_> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for FillTicket<'_> {
    fn drop(&mut self) {
        let mut active = self.guard.active.lock();
        if active.get(&self.page_key) == Some(&self.generation) {
            active.remove(&self.page_key);
        }
    }
}
