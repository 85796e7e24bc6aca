//! In-memory page model.
//!
//! Backs tests and fixture-driven dry runs: a flat list of form controls
//! loaded from JSON, resolvable through the selector subset in
//! [`crate::selector`], recording every notification emitted on it.

use field_locator::Locator;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::ports::{
    ChoiceOption, ControlKind, ElementHandle, PageError, PageEvent, PagePort, ResolvedElement,
};
use crate::selector::{self, CompoundSelector};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryControl {
    pub tag: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PageEvent>,
}

impl MemoryControl {
    pub fn input(name: &str) -> Self {
        Self {
            tag: "input".into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn textarea(name: &str) -> Self {
        Self {
            tag: "textarea".into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn select(name: &str, options: Vec<ChoiceOption>) -> Self {
        Self {
            tag: "select".into(),
            name: Some(name.into()),
            options,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.into();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn kind(&self) -> ControlKind {
        match self.tag.to_ascii_lowercase().as_str() {
            "textarea" => ControlKind::FreeText,
            "select" => ControlKind::Choice,
            "input" => match self.input_type.as_deref().unwrap_or("text") {
                "text" | "search" | "email" | "tel" | "number" | "url" => ControlKind::FreeText,
                _ => ControlKind::Other,
            },
            _ => ControlKind::Other,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "name" => self.name.as_deref(),
            "type" if self.tag.eq_ignore_ascii_case("input") => {
                Some(self.input_type.as_deref().unwrap_or("text"))
            }
            "type" => self.input_type.as_deref(),
            _ => None,
        }
    }

    fn matches(&self, selector: &CompoundSelector) -> bool {
        if let Some(tag) = &selector.tag {
            if !self.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        selector
            .attrs
            .iter()
            .all(|(name, value)| self.attr(name) == Some(value.as_str()))
    }
}

/// Serializable page snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub controls: Vec<MemoryControl>,
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    url: Option<String>,
    controls: Mutex<Vec<MemoryControl>>,
}

impl MemoryPage {
    pub fn new(controls: Vec<MemoryControl>) -> Self {
        Self {
            url: None,
            controls: Mutex::new(controls),
        }
    }

    pub fn from_fixture(fixture: PageFixture) -> Self {
        Self {
            url: fixture.url,
            controls: Mutex::new(fixture.controls),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PageError> {
        let fixture: PageFixture =
            serde_json::from_str(json).map_err(|err| PageError::Fixture(err.to_string()))?;
        Ok(Self::from_fixture(fixture))
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn snapshot(&self) -> PageFixture {
        PageFixture {
            url: self.url.clone(),
            controls: self.controls.lock().clone(),
        }
    }

    /// Current value of the first control matching `selector`.
    pub fn value_of(&self, selector: &str) -> Option<String> {
        self.find(selector).map(|control| control.value)
    }

    /// Notifications emitted so far on the first control matching `selector`.
    pub fn events_of(&self, selector: &str) -> Vec<PageEvent> {
        self.find(selector)
            .map(|control| control.events)
            .unwrap_or_default()
    }

    fn find(&self, selector: &str) -> Option<MemoryControl> {
        let parsed = selector::parse(selector).ok()?;
        self.controls
            .lock()
            .iter()
            .find(|control| control.matches(&parsed))
            .cloned()
    }

    fn with_control<T>(
        &self,
        element: &ElementHandle,
        f: impl FnOnce(&mut MemoryControl) -> Result<T, PageError>,
    ) -> Result<T, PageError> {
        let index = parse_handle(element)?;
        let mut controls = self.controls.lock();
        let control = controls
            .get_mut(index)
            .ok_or_else(|| PageError::Detached(element.0.clone()))?;
        f(control)
    }
}

fn handle_for(index: usize) -> ElementHandle {
    ElementHandle(format!("mem:{index}"))
}

fn parse_handle(element: &ElementHandle) -> Result<usize, PageError> {
    element
        .0
        .strip_prefix("mem:")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| PageError::Detached(element.0.clone()))
}

impl PagePort for MemoryPage {
    fn resolve_one(&self, locator: &Locator) -> Result<Option<ResolvedElement>, PageError> {
        let parsed =
            selector::parse(locator.as_str()).map_err(|reason| PageError::InvalidLocator {
                locator: locator.to_string(),
                reason,
            })?;
        let controls = self.controls.lock();
        Ok(controls
            .iter()
            .position(|control| control.matches(&parsed))
            .map(|index| ResolvedElement {
                handle: handle_for(index),
                kind: controls[index].kind(),
            }))
    }

    fn read_options(&self, element: &ElementHandle) -> Result<Vec<ChoiceOption>, PageError> {
        self.with_control(element, |control| Ok(control.options.clone()))
    }

    fn read_value(&self, element: &ElementHandle) -> Result<Option<String>, PageError> {
        self.with_control(element, |control| Ok(Some(control.value.clone())))
    }

    fn write_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError> {
        self.with_control(element, |control| {
            let rejected = |reason: &str| PageError::Rejected {
                element: element.0.clone(),
                reason: reason.into(),
            };
            if control.disabled {
                return Err(rejected("disabled"));
            }
            if control.readonly {
                return Err(rejected("readonly"));
            }
            match control.kind() {
                ControlKind::Other => Err(PageError::UnsupportedControl(control.tag.clone())),
                ControlKind::Choice
                    if !control.options.iter().any(|option| option.value == value) =>
                {
                    Err(rejected("not one of the options"))
                }
                _ => {
                    control.value = value.to_string();
                    Ok(())
                }
            }
        })
    }

    fn emit(&self, element: &ElementHandle, event: PageEvent) -> Result<(), PageError> {
        self.with_control(element, |control| {
            control.events.push(event);
            Ok(())
        })
    }
}
