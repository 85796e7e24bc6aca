//! Option selection for constrained-choice controls.
//!
//! Exact (case-insensitive) value or label equality wins outright. Otherwise
//! the first option in native order whose value or label contains the target,
//! or whose label is contained in the target, is taken. No further tie-break.
//! Options with a blank value are placeholders and never match, since
//! selecting one would clear the control.

use serde::Serialize;

use crate::ports::ChoiceOption;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
}

#[derive(Clone, Copy, Debug)]
pub struct OptionMatch<'a> {
    pub option: &'a ChoiceOption,
    pub index: usize,
    pub kind: MatchKind,
}

pub fn match_option<'a>(options: &'a [ChoiceOption], target: &str) -> Option<OptionMatch<'a>> {
    let needle = target.to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact = options.iter().position(|option| {
        selectable(option)
            && (option.value.to_lowercase() == needle || option.label.to_lowercase() == needle)
    });
    if let Some(index) = exact {
        return Some(OptionMatch {
            option: &options[index],
            index,
            kind: MatchKind::Exact,
        });
    }

    options
        .iter()
        .position(|option| {
            if !selectable(option) {
                return false;
            }
            let value = option.value.to_lowercase();
            let label = option.label.to_lowercase();
            // an empty label would be "contained" in every target
            value.contains(&needle)
                || label.contains(&needle)
                || (!label.is_empty() && needle.contains(&label))
        })
        .map(|index| OptionMatch {
            option: &options[index],
            index,
            kind: MatchKind::Substring,
        })
}

fn selectable(option: &ChoiceOption) -> bool {
    !option.value.trim().is_empty()
}
