//! Shared primitives for the grievance autofill engine.
//!
//! Every other crate in the workspace speaks in these types: the canonical
//! grievance record, the closed set of writable fields, the supported target
//! sites and the explicit page context passed into each entry point.

mod record;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use record::{CanonicalField, CanonicalRecord, CanonicalRecordBuilder};

/// Errors raised while building shared primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unsupported site: {0}")]
    UnsupportedSite(String),
    #[error("unknown canonical field: {0}")]
    UnknownField(String),
    #[error("invalid page url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Correlation id attached to one fill invocation in logs.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FillId(pub String);

impl FillId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for FillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target sites the engine carries locator tables for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SiteId {
    #[serde(rename = "consumerhelpline.gov.in")]
    ConsumerHelpline,
    #[serde(rename = "fcaportal.nic.in")]
    FcaPortal,
}

impl SiteId {
    pub const ALL: [SiteId; 2] = [SiteId::ConsumerHelpline, SiteId::FcaPortal];

    /// Host the site is served from.
    pub fn domain(&self) -> &'static str {
        match self {
            SiteId::ConsumerHelpline => "consumerhelpline.gov.in",
            SiteId::FcaPortal => "fcaportal.nic.in",
        }
    }

    /// Detects the site a URL belongs to.
    ///
    /// Parseable URLs are matched on their host (exact or subdomain). Strings
    /// that do not parse as URLs fall back to a case-insensitive substring
    /// check, which keeps bare host strings like `consumerhelpline.gov.in/x`
    /// working.
    pub fn detect(url: &str) -> Option<SiteId> {
        match url::Url::parse(url) {
            Ok(parsed) => {
                let host = parsed.host_str()?.to_ascii_lowercase();
                SiteId::ALL.into_iter().find(|site| {
                    let domain = site.domain();
                    host == domain || host.ends_with(&format!(".{domain}"))
                })
            }
            Err(_) => {
                let lowered = url.to_ascii_lowercase();
                SiteId::ALL
                    .into_iter()
                    .find(|site| lowered.contains(site.domain()))
            }
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

impl FromStr for SiteId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumerhelpline.gov.in" | "consumerhelpline" => Ok(SiteId::ConsumerHelpline),
            "fcaportal.nic.in" | "fcaportal" => Ok(SiteId::FcaPortal),
            other => Err(CoreError::UnsupportedSite(other.to_string())),
        }
    }
}

/// The page the engine is acting on, passed explicitly into every entry point.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    pub url: String,
    pub site: SiteId,
}

impl PageContext {
    pub fn new(url: impl Into<String>, site: SiteId) -> Self {
        Self {
            url: url.into(),
            site,
        }
    }

    /// Builds a context by detecting the site from the URL.
    pub fn from_url(url: impl Into<String>) -> Result<Self, CoreError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(CoreError::InvalidUrl {
                url,
                reason: "empty".into(),
            });
        }
        let site = SiteId::detect(&url).ok_or_else(|| CoreError::UnsupportedSite(url.clone()))?;
        Ok(Self { url, site })
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site={} url={}", self.site, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_site_by_host() {
        assert_eq!(
            SiteId::detect("https://consumerhelpline.gov.in/user/register-complaint.php"),
            Some(SiteId::ConsumerHelpline)
        );
        assert_eq!(
            SiteId::detect("https://www.FCAPORTAL.nic.in/lodge"),
            Some(SiteId::FcaPortal)
        );
        assert_eq!(SiteId::detect("https://example.com/complaint"), None);
    }

    #[test]
    fn host_match_ignores_query_mentions() {
        assert_eq!(
            SiteId::detect("https://example.com/?next=consumerhelpline.gov.in"),
            None
        );
    }

    #[test]
    fn unparseable_urls_fall_back_to_substring() {
        assert_eq!(
            SiteId::detect("consumerhelpline.gov.in/register"),
            Some(SiteId::ConsumerHelpline)
        );
    }

    #[test]
    fn site_round_trips_through_strings() {
        for site in SiteId::ALL {
            assert_eq!(site.domain().parse::<SiteId>().unwrap(), site);
        }
        assert!("example.com".parse::<SiteId>().is_err());
    }

    #[test]
    fn context_from_url_rejects_unsupported_hosts() {
        let ctx = PageContext::from_url("https://fcaportal.nic.in/file").unwrap();
        assert_eq!(ctx.site, SiteId::FcaPortal);
        assert!(matches!(
            PageContext::from_url("https://example.com"),
            Err(CoreError::UnsupportedSite(_))
        ));
        assert!(matches!(
            PageContext::from_url("  "),
            Err(CoreError::InvalidUrl { .. })
        ));
    }
}
