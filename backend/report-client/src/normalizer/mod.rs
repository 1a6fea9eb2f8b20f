//! Repairs service payloads into stable client shapes.
//!
//! Every function here is total over `serde_json::Value`: missing arrays
//! become empty, alias field names are folded onto one name, and a payload
//! of the wrong type yields the empty value for its shape. The only
//! exceptions are responses whose sole purpose is to hand back an id
//! (uploads, generation); without that id there is nothing to repair, so
//! those return a `Shape` error instead.

mod comparison;
mod documents;
mod models;
mod reports;

pub use comparison::{derive_summary, normalize_comparison, normalize_model_output};
pub use documents::{normalize_document, normalize_file_list};
pub use models::{normalize_categories, normalize_model, normalize_model_list};
pub use reports::{
    normalize_acknowledgement, normalize_generated, normalize_report, normalize_report_list,
    normalize_uploaded,
};

use serde_json::Value;

/// First present, non-null field among `aliases`.
pub(crate) fn field<'a>(value: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    aliases
        .iter()
        .filter_map(|alias| object.get(*alias))
        .find(|candidate| !candidate.is_null())
}

/// Text field, accepting numbers and booleans as text. Blank strings count
/// as absent.
pub(crate) fn text(value: &Value, aliases: &[&str]) -> Option<String> {
    match field(value, aliases)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Ordered text list. Non-string entries are skipped.
pub(crate) fn text_list(value: &Value, aliases: &[&str]) -> Vec<String> {
    match field(value, aliases) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Entries of a list payload that is either a bare array or an object
/// wrapping the array under one of `keys`.
pub(crate) fn list_items<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    match value {
        Value::Array(entries) => entries,
        Value::Object(_) => match field(value, keys) {
            Some(Value::Array(entries)) => entries,
            _ => &[],
        },
        _ => &[],
    }
}
