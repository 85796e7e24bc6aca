//! Backend payload → canonical record.
//!
//! Two shapes are recognized, in order:
//! 1. an envelope `{ "status": "success", "data": { ...flat record... } }`
//! 2. a flat record carrying at least one of `state`, `city`, `sector`
//!
//! Anything else is `InvalidResponseShape`.

use autofill_core_types::{CanonicalField, CanonicalRecord};
use serde_json::{Map, Value};

use crate::errors::FetchError;

pub const SUCCESS_MARKER: &str = "success";

const FLAT_MARKERS: [&str; 3] = ["state", "city", "sector"];

/// Keys accepted per field; the canonical name comes first and wins.
const FIELD_KEYS: [(CanonicalField, &[&str]); 8] = [
    (CanonicalField::State, &["state"]),
    (CanonicalField::City, &["city"]),
    (CanonicalField::Sector, &["sector"]),
    (CanonicalField::Category, &["category"]),
    (CanonicalField::Company, &["company"]),
    (
        CanonicalField::GrievanceNarrative,
        &["grievanceNarrative", "grievance"],
    ),
    (
        CanonicalField::ProductValueRange,
        &["productValueRange", "productValue"],
    ),
    (CanonicalField::DealerInfo, &["dealerInfo"]),
];

const IDENTIFIER_KEYS: [&str; 3] = ["identifier", "_id", "id"];

pub fn normalize(value: &Value) -> Result<CanonicalRecord, FetchError> {
    let object = value.as_object().ok_or(FetchError::InvalidResponseShape)?;

    if object.get("status").and_then(Value::as_str) == Some(SUCCESS_MARKER) {
        if let Some(data) = object.get("data").and_then(Value::as_object) {
            return Ok(from_flat(data));
        }
    }

    if FLAT_MARKERS
        .iter()
        .any(|key| text_value(object.get(*key)).is_some())
    {
        return Ok(from_flat(object));
    }

    Err(FetchError::InvalidResponseShape)
}

fn from_flat(object: &Map<String, Value>) -> CanonicalRecord {
    let mut builder = CanonicalRecord::builder();
    for (field, keys) in FIELD_KEYS {
        if let Some(value) = first_text(object, keys) {
            builder = builder.set(field, value);
        }
    }
    if let Some(identifier) = first_text(object, &IDENTIFIER_KEYS) {
        builder = builder.identifier(identifier);
    }
    builder.build()
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_value(object.get(*key)))
}

fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
