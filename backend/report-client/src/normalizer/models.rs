use super::{list_items, text};

use models::{Category, Model, UNKNOWN_PLACEHOLDER};

use log::warn;
use serde_json::Value;

/// Accepts `[...]` or `{"items": [...]}`. Entries are never dropped: a
/// missing id or name becomes `"unknown"`.
pub fn normalize_model_list(payload: &Value) -> Vec<Model> {
    list_items(payload, &["items", "models"])
        .iter()
        .map(normalize_model)
        .collect()
}

pub fn normalize_model(entry: &Value) -> Model {
    if let Value::String(id) = entry {
        return Model::new(id.clone(), id.clone());
    }

    let id = text(entry, &["id", "model_id"]);
    let name = text(entry, &["name", "model_name"]);
    if id.is_none() || name.is_none() {
        warn!("Model entry missing id or name, substituting placeholder: {entry}");
    }

    Model {
        id: id.unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
        name: name.unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
        provider: text(entry, &["provider"]).unwrap_or_default(),
        description: text(entry, &["description"]).unwrap_or_default(),
    }
}

pub fn normalize_categories(payload: &Value) -> Vec<Category> {
    list_items(payload, &["items", "categories"])
        .iter()
        .map(|entry| match entry {
            Value::String(id) => Category {
                id: id.clone(),
                name: id.clone(),
            },
            _ => Category {
                id: text(entry, &["id"]).unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
                name: text(entry, &["name"]).unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
            },
        })
        .collect()
}
