// Unit tests for document list normalization

use crate::normalizer::{normalize_document, normalize_file_list};

use models::DocumentStatus;

use serde_json::{Value, json};

#[test]
fn given_wrapped_listing_when_normalizing_then_items_and_cursor_kept() {
    let payload = json!({
        "items": [
            {
                "file_id": "f1",
                "original_filename": "q3.pdf",
                "category": "finance",
                "s3_url": "s3://bucket/f1",
                "status": "processing",
                "upload_time": "2024-05-01T10:00:00Z"
            }
        ],
        "last_evaluated_key": "f1"
    });

    let list = normalize_file_list(&payload);

    assert_eq!(list.items.len(), 1);
    let document = &list.items[0];
    assert_eq!(document.file_id, "f1");
    assert_eq!(document.original_filename, "q3.pdf");
    assert_eq!(document.category, "finance");
    assert_eq!(document.storage_ref.as_deref(), Some("s3://bucket/f1"));
    assert_eq!(document.status, DocumentStatus::Processing);
    assert_eq!(document.uploaded_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    assert_eq!(list.last_evaluated_key.as_deref(), Some("f1"));
}

#[test]
fn given_bare_array_when_normalizing_then_treated_as_items() {
    let list = normalize_file_list(&json!([{ "id": "f2", "filename": "notes.txt" }]));

    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].file_id, "f2");
    assert_eq!(list.items[0].original_filename, "notes.txt");
    assert!(list.last_evaluated_key.is_none());
}

/// **VALUE**: Verifies every malformed listing yields an empty list.
///
/// **WHY THIS MATTERS**: The document list view renders whatever it gets; it
/// never has to handle a missing array.
#[test]
fn given_malformed_payloads_when_normalizing_then_empty_list() {
    for payload in [
        Value::Null,
        json!("files"),
        json!(42),
        json!({}),
        json!({ "items": null }),
        json!({ "items": "f1" }),
    ] {
        let list = normalize_file_list(&payload);
        assert!(list.items.is_empty(), "payload {payload} should give no items");
        assert!(list.last_evaluated_key.is_none());
    }
}

#[test]
fn given_non_object_entries_when_normalizing_then_skipped() {
    let list = normalize_file_list(&json!({ "items": [null, "f1", { "file_id": "f3" }] }));

    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].file_id, "f3");
}

#[test]
fn given_key_object_cursor_when_normalizing_then_carried_as_json_text() {
    let list = normalize_file_list(&json!({
        "items": [],
        "last_evaluated_key": { "file_id": "f9" }
    }));
    assert_eq!(list.last_evaluated_key.as_deref(), Some(r#"{"file_id":"f9"}"#));

    let list = normalize_file_list(&json!({ "items": [], "last_evaluated_key": {} }));
    assert!(list.last_evaluated_key.is_none());
}

#[test]
fn given_missing_fields_when_normalizing_document_then_defaults() {
    let document = normalize_document(&json!({ "file_id": "f4" }));

    assert_eq!(document.file_id, "f4");
    assert_eq!(document.original_filename, "");
    assert_eq!(document.status, DocumentStatus::Uploaded);
    assert!(document.storage_ref.is_none());
    assert!(document.report_id.is_none());
}

#[test]
fn given_service_statuses_when_normalizing_document_then_mapped() {
    let status = |raw: &str| normalize_document(&json!({ "status": raw })).status;

    assert_eq!(status("uploaded"), DocumentStatus::Uploaded);
    assert_eq!(status("completed"), DocumentStatus::Completed);
    assert_eq!(status("error"), DocumentStatus::Failed);
    assert_eq!(status("queued"), DocumentStatus::Uploaded);
}
