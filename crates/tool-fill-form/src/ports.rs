use field_locator::Locator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability set the filler needs from a live page.
///
/// Calls are synchronous: once a record is resolved the write path runs
/// without suspension between locating an element and writing to it.
pub trait PagePort: Send + Sync {
    /// Resolve a locator to at most one element. `Ok(None)` means nothing matched.
    fn resolve_one(&self, locator: &Locator) -> Result<Option<ResolvedElement>, PageError>;
    fn read_options(&self, element: &ElementHandle) -> Result<Vec<ChoiceOption>, PageError>;
    fn read_value(&self, element: &ElementHandle) -> Result<Option<String>, PageError>;
    fn write_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError>;
    /// Dispatch a bubbling notification, as a user-driven edit would.
    fn emit(&self, element: &ElementHandle, event: PageEvent) -> Result<(), PageError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("invalid locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },
    #[error("element {0} is no longer attached")]
    Detached(String),
    #[error("element {element} rejected value: {reason}")]
    Rejected { element: String, reason: String },
    #[error("unsupported control <{0}>")]
    UnsupportedControl(String),
    #[error("invalid page fixture: {0}")]
    Fixture(String),
}

/// Opaque reference to a live element, meaningful only to the page that issued it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub String);

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// input / textarea: any string is accepted
    FreeText,
    /// select: one value out of a fixed option list
    Choice,
    /// anything the filler cannot write to
    Other,
}

#[derive(Clone, Debug)]
pub struct ResolvedElement {
    pub handle: ElementHandle,
    pub kind: ControlKind,
}

/// One entry of a constrained-choice control.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option without an explicit value attribute: its value is its text.
    pub fn labelled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
        }
    }
}

#[derive(Deserialize)]
struct RawOption {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    label: String,
}

impl From<RawOption> for ChoiceOption {
    fn from(raw: RawOption) -> Self {
        match raw.value {
            Some(value) => ChoiceOption::new(value, raw.label),
            None => ChoiceOption::labelled(raw.label),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageEvent {
    Input,
    Change,
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Input => "input",
            PageEvent::Change => "change",
        }
    }
}
