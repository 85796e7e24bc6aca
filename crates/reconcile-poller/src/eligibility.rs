use autofill_core_types::SiteId;
use serde::Serialize;

/// Where the active page stands with respect to filling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "site", rename_all = "snake_case")]
pub enum Eligibility {
    /// Supported site and a complaint-entry page.
    Eligible(SiteId),
    /// Supported site, but not on a complaint page yet.
    SupportedSite(SiteId),
    Unsupported,
}

impl Eligibility {
    /// Keywords match case-insensitively anywhere in the URL.
    pub fn evaluate<S: AsRef<str>>(url: &str, keywords: &[S]) -> Self {
        let Some(site) = SiteId::detect(url) else {
            return Eligibility::Unsupported;
        };
        let lowered = url.to_ascii_lowercase();
        let on_form = keywords.iter().any(|keyword| {
            let keyword = keyword.as_ref().trim();
            !keyword.is_empty() && lowered.contains(&keyword.to_ascii_lowercase())
        });
        if on_form {
            Eligibility::Eligible(site)
        } else {
            Eligibility::SupportedSite(site)
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible(_))
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Eligibility::Eligible(_) => "ready to auto-fill",
            Eligibility::SupportedSite(_) => "supported site; open the complaint form",
            Eligibility::Unsupported => "not a supported consumer complaint site",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_KEYWORDS;

    #[test]
    fn three_way_verdict() {
        assert_eq!(
            Eligibility::evaluate(
                "https://consumerhelpline.gov.in/user/Register-Complaint.php",
                &DEFAULT_KEYWORDS
            ),
            Eligibility::Eligible(SiteId::ConsumerHelpline)
        );
        assert_eq!(
            Eligibility::evaluate("https://fcaportal.nic.in/home", &DEFAULT_KEYWORDS),
            Eligibility::SupportedSite(SiteId::FcaPortal)
        );
        assert_eq!(
            Eligibility::evaluate("https://example.com/complaint", &DEFAULT_KEYWORDS),
            Eligibility::Unsupported
        );
    }

    #[test]
    fn blank_keywords_never_match() {
        assert!(!Eligibility::evaluate("https://fcaportal.nic.in/home", &["", "  "]).is_eligible());
    }
}
