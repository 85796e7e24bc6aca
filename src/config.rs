//! Application configuration
//!
//! One YAML document with a section per component. Every section has
//! defaults, so an absent or empty file is a valid configuration.

use std::env;

use field_locator::FieldMappingTable;
use reconcile_poller::PollerConfig;
use record_fetch::{reporter::FORM_FILLED, EndpointConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const BASE_URL_ENV: &str = "GRIEVANCE_API_BASE_URL";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backend: EndpointConfig,
    pub poller: PollerConfig,
    /// Token written back after a fill.
    pub status_token: String,
    /// Site entries replacing the built-in locator tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<FieldMappingTable>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: EndpointConfig::default(),
            poller: PollerConfig::default(),
            status_token: FORM_FILLED.to_string(),
            mappings: None,
        }
    }
}

impl Config {
    /// Built-in locator tables with configured site entries applied.
    pub fn mapping_table(&self) -> FieldMappingTable {
        match &self.mappings {
            Some(overrides) => FieldMappingTable::builtin().with_overrides(overrides.clone()),
            None => FieldMappingTable::builtin(),
        }
    }

    /// Environment values win over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            let base_url = base_url.trim();
            if !base_url.is_empty() {
                info!(base_url, "Using backend from {}", BASE_URL_ENV);
                self.backend.base_url = base_url.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofill_core_types::{CanonicalField, SiteId};

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.status_token, "form_filled");
        assert_eq!(config.poller.period_ms, 300_000);
    }

    #[test]
    fn mapping_override_replaces_only_its_site() {
        let config: Config = serde_yaml::from_str(
            r#"
mappings:
  fcaportal.nic.in:
    state: ["select#stateId"]
"#,
        )
        .unwrap();
        let table = config.mapping_table();
        let fca = table.for_site(SiteId::FcaPortal);
        assert_eq!(fca.chain(CanonicalField::State).unwrap().len(), 1);
        assert!(fca.chain(CanonicalField::City).is_none());
        assert!(table
            .for_site(SiteId::ConsumerHelpline)
            .chain(CanonicalField::City)
            .is_some());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(serde_yaml::from_str::<Config>("backend:\n  base_uri: x\n").is_err());
        assert!(serde_yaml::from_str::<Config>("telemetry: true\n").is_err());
    }
}
