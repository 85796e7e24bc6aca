//! Error types for mapping table construction

use thiserror::Error;

/// Mapping table error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Site key is not one of the supported sites
    #[error("Unknown site in mapping table: {0}")]
    UnknownSite(String),

    /// Field key is not a canonical field
    #[error("Unknown field '{field}' in mapping for {site}")]
    UnknownField { site: String, field: String },

    /// Locator string is empty
    #[error("Empty locator for {site}/{field}")]
    EmptyLocator { site: String, field: String },
}
