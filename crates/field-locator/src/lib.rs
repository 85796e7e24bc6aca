//! Field mapping tables - ordered locator chains per site
//!
//! This crate holds the static configuration the form filler consults:
//! - Locators (CSS selector descriptors) for finding one element
//! - Locator chains ordered from most specific to most generic
//! - Per-site tables keyed by closed site and field enums
//! - Built-in tables for the supported portals

pub mod errors;
pub mod table;
pub mod types;

pub use errors::*;
pub use table::*;
pub use types::*;
