//! Per-site field mapping tables

use std::collections::BTreeMap;

use autofill_core_types::{CanonicalField, SiteId};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::{errors::MappingError, types::*};

/// Untyped table shape as it appears in configuration files.
pub type RawMappingTable = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Locator chains for every mapped field of one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteMapping {
    fields: BTreeMap<CanonicalField, LocatorChain>,
}

impl SiteMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chain for a field (builder style)
    pub fn with_field<I, S>(mut self, field: CanonicalField, locators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(field, locators.into_iter().collect());
        self
    }

    /// Chain configured for a field; `None` when the field has no locators.
    pub fn chain(&self, field: CanonicalField) -> Option<&LocatorChain> {
        self.fields.get(&field).filter(|chain| !chain.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (CanonicalField, &LocatorChain)> {
        self.fields.iter().map(|(field, chain)| (*field, chain))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(LocatorChain::is_empty)
    }
}

/// Read-only mapping from site to field locator chains.
///
/// Sites without their own entry borrow the fallback site's mapping, so a
/// portal that shares the national helpline's form layout needs no copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMappingTable")]
pub struct FieldMappingTable {
    sites: BTreeMap<SiteId, SiteMapping>,
    fallback: SiteId,
    empty: SiteMapping,
}

impl FieldMappingTable {
    /// Build a table from typed site mappings
    pub fn new(sites: BTreeMap<SiteId, SiteMapping>) -> Self {
        Self {
            sites,
            fallback: SiteId::ConsumerHelpline,
            empty: SiteMapping::default(),
        }
    }

    /// Locator tables shipped with the engine
    pub fn builtin() -> Self {
        let helpline = SiteMapping::new()
            .with_field(
                CanonicalField::State,
                ["select[name=\"state\"]", "select[id=\"state\"]", "#state"],
            )
            .with_field(
                CanonicalField::City,
                [
                    "input[name=\"city\"]",
                    "input[id=\"city\"]",
                    "#city",
                    "input[name=\"purchaseCity\"]",
                ],
            )
            .with_field(
                CanonicalField::Sector,
                [
                    "select[name=\"sector\"]",
                    "select[id=\"sector\"]",
                    "#sector",
                    "select[name=\"sectorIndustry\"]",
                ],
            )
            .with_field(
                CanonicalField::Category,
                [
                    "input[name=\"category\"]",
                    "select[name=\"category\"]",
                    "#category",
                ],
            )
            .with_field(
                CanonicalField::Company,
                [
                    "input[name=\"company_name\"]",
                    "input[name=\"company\"]",
                    "#company",
                ],
            )
            .with_field(
                CanonicalField::GrievanceNarrative,
                [
                    "textarea[name=\"nature\"]",
                    "textarea[name=\"grievance_details\"]",
                    "#grievance",
                    "textarea[name=\"natureOfGrievance\"]",
                ],
            )
            .with_field(
                CanonicalField::ProductValueRange,
                ["select[name=\"product_value\"]", "#productValue"],
            )
            .with_field(
                CanonicalField::DealerInfo,
                ["textarea[name=\"dealer_info\"]", "#dealerInfo"],
            );

        let mut sites = BTreeMap::new();
        sites.insert(SiteId::ConsumerHelpline, helpline);
        Self::new(sites)
    }

    /// Build a typed table from configuration, rejecting unknown keys
    pub fn from_raw(raw: &RawMappingTable) -> Result<Self, MappingError> {
        let mut sites = BTreeMap::new();
        for (site_key, fields) in raw {
            let site: SiteId = site_key
                .parse()
                .map_err(|_| MappingError::UnknownSite(site_key.clone()))?;
            let mut mapping = SiteMapping::new();
            for (field_key, locators) in fields {
                let field: CanonicalField =
                    field_key.parse().map_err(|_| MappingError::UnknownField {
                        site: site_key.clone(),
                        field: field_key.clone(),
                    })?;
                if locators.iter().any(|locator| locator.trim().is_empty()) {
                    return Err(MappingError::EmptyLocator {
                        site: site_key.clone(),
                        field: field_key.clone(),
                    });
                }
                mapping = mapping.with_field(field, locators.iter().map(String::as_str));
            }
            sites.insert(site, mapping);
        }
        Ok(Self::new(sites))
    }

    /// Replace whole site entries with the ones from `overrides`
    pub fn with_overrides(mut self, overrides: FieldMappingTable) -> Self {
        for (site, mapping) in overrides.sites {
            debug!(site = %site, "Overriding built-in mapping");
            self.sites.insert(site, mapping);
        }
        self
    }

    /// Mapping entry for a site, falling back to the default site's entry
    pub fn for_site(&self, site: SiteId) -> &SiteMapping {
        self.sites
            .get(&site)
            .or_else(|| self.sites.get(&self.fallback))
            .unwrap_or(&self.empty)
    }

    /// Whether the site carries its own entry (without fallback)
    pub fn has_own_entry(&self, site: SiteId) -> bool {
        self.sites.contains_key(&site)
    }

    pub fn sites(&self) -> impl Iterator<Item = (SiteId, &SiteMapping)> {
        self.sites.iter().map(|(site, mapping)| (*site, mapping))
    }
}

impl Default for FieldMappingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<RawMappingTable> for FieldMappingTable {
    type Error = MappingError;

    fn try_from(raw: RawMappingTable) -> Result<Self, Self::Error> {
        Self::from_raw(&raw)
    }
}

impl Serialize for FieldMappingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sites.serialize(serializer)
    }
}
