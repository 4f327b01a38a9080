//! Input structs for the JSON API: serde + validator on the way in,
//! fallible conversion into domain payloads.

use serde_json::{Map, Value};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod client;
pub mod event;
pub mod general_info;
pub mod payment;
pub mod timeline;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0}")]
    Invalid(String),
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        FormError::Invalid(errors.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        FormError::Invalid(err.to_string())
    }
}

/// Strips markup from a free-text field that is echoed back to other users.
pub(crate) fn sanitize_text(input: &str) -> String {
    ammonia::clean(input)
}

/// Sanitizes every string leaf of a submitted detail patch.
pub(crate) fn sanitize_patch(patch: Map<String, Value>) -> Map<String, Value> {
    patch
        .into_iter()
        .map(|(key, value)| (key, sanitize_value(value)))
        .collect()
}

fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_text(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, sanitize_value(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn markup_is_stripped_from_nested_patch_values() {
        let patch = json!({
            "weddingParty": "<script>alert(1)</script>Best man: Sam",
            "songChoice": {"items": ["<b>At Last</b>"]},
        })
        .as_object()
        .unwrap()
        .clone();
        let clean = sanitize_patch(patch);
        let party = clean.get("weddingParty").unwrap().as_str().unwrap();
        assert!(!party.contains("<script>"));
        assert!(party.contains("Best man: Sam"));
    }
}
