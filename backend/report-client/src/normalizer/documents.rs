use super::{field, list_items, text};

use models::{Document, DocumentStatus, FileList};

use log::warn;
use serde_json::Value;

pub fn normalize_file_list(payload: &Value) -> FileList {
    let entries = list_items(payload, &["items"]);

    let items = entries
        .iter()
        .filter(|entry| {
            let keep = entry.is_object();
            if !keep {
                warn!("Skipping non-object entry in file list: {entry}");
            }
            keep
        })
        .map(normalize_document)
        .collect();

    FileList {
        items,
        last_evaluated_key: cursor(payload),
    }
}

pub fn normalize_document(entry: &Value) -> Document {
    Document {
        file_id: text(entry, &["file_id", "id"]).unwrap_or_default(),
        original_filename: text(entry, &["original_filename", "filename", "name"])
            .unwrap_or_default(),
        category: text(entry, &["category"]).unwrap_or_default(),
        storage_ref: text(entry, &["s3_url", "s3_key"]),
        status: text(entry, &["status"])
            .map(|status| DocumentStatus::from_service(&status))
            .unwrap_or_default(),
        uploaded_at: text(entry, &["upload_time", "created_at"]),
        updated_at: text(entry, &["updated_at"]),
        report_id: text(entry, &["report_id"]),
    }
}

/// DynamoDB hands back its cursor as a key object; it is carried as compact
/// JSON text so it can be echoed back as the `last_key` query parameter.
fn cursor(payload: &Value) -> Option<String> {
    match field(payload, &["last_evaluated_key", "last_key"])? {
        Value::String(key) if !key.is_empty() => Some(key.clone()),
        Value::String(_) => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
