//! Core types for locator chains

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque descriptor used to find exactly one element on the target page.
///
/// The engine treats it as a CSS selector string; only the page capability
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Create a CSS locator
    pub fn css(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    /// Get the selector text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Locator::css(value)
    }
}

/// Ordered locators for one canonical field.
///
/// Declared order encodes the site author's confidence ranking: the first
/// entry is the most specific, the last the most generic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocatorChain(Vec<Locator>);

impl LocatorChain {
    pub fn new(locators: Vec<Locator>) -> Self {
        Self(locators)
    }

    /// Locators in declared order
    pub fn iter(&self) -> impl Iterator<Item = &Locator> {
        self.0.iter()
    }

    /// Locators paired with their 1-based position in the chain
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &Locator)> {
        self.0.iter().enumerate().map(|(idx, locator)| (idx + 1, locator))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LocatorChain {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Locator::css).collect())
    }
}
