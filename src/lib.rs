//! Grievance autofill library
//!
//! Exposes the engine facade, configuration and CLI for integration testing

pub mod cli;
pub mod config;
pub mod engine;

// Re-export commonly used types for external use
pub use autofill_core_types::{CanonicalField, CanonicalRecord, PageContext, SiteId};
pub use config::Config;
pub use engine::{FetchFillOptions, FillSession, GrievanceEngine, Mount, RecordOrigin};
