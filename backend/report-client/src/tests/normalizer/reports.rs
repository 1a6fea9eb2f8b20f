// Unit tests for report normalization

use crate::error::FailureKind;
use crate::normalizer::{
    normalize_acknowledgement, normalize_generated, normalize_report, normalize_report_list,
    normalize_uploaded,
};

use models::Report;

use serde_json::{Value, json};

#[test]
fn given_full_report_when_normalizing_then_all_fields_mapped() {
    let report = normalize_report(&json!({
        "report_id": "r1",
        "file_id": "f1",
        "title": "Q3",
        "content": "# R1",
        "summary": "Revenue grew",
        "key_points": ["growth", "margin"],
        "recommendations": ["hire"],
        "model_id": "m1",
        "model_name": "Claude",
        "status": "completed",
        "created_at": "2024-05-01T10:00:00Z"
    }));

    assert_eq!(report.report_id, "r1");
    assert_eq!(report.file_id, "f1");
    assert_eq!(report.title.as_deref(), Some("Q3"));
    assert_eq!(report.content, "# R1");
    assert_eq!(report.summary, "Revenue grew");
    assert_eq!(report.key_points, vec!["growth", "margin"]);
    assert_eq!(report.recommendations, vec!["hire"]);
    assert_eq!(report.model_id.as_deref(), Some("m1"));
    assert_eq!(report.model_name.as_deref(), Some("Claude"));
}

#[test]
fn given_aliases_when_normalizing_report_then_folded() {
    let report = normalize_report(&json!({
        "id": "r2",
        "sections": { "summary": "From sections" },
        "keyPoints": ["a"],
        "modelId": "m2",
        "generated_at": "2024-05-02"
    }));

    assert_eq!(report.report_id, "r2");
    assert_eq!(report.summary, "From sections");
    assert_eq!(report.key_points, vec!["a"]);
    assert_eq!(report.model_id.as_deref(), Some("m2"));
    assert_eq!(report.created_at.as_deref(), Some("2024-05-02"));
}

#[test]
fn given_non_object_when_normalizing_report_then_empty_report() {
    assert_eq!(normalize_report(&Value::Null), Report::default());
    assert_eq!(normalize_report(&json!([1, 2])), Report::default());
}

#[test]
fn given_listing_when_normalizing_reports_then_entries_without_id_dropped() {
    let reports = normalize_report_list(&json!({
        "items": [
            { "report_id": "r1", "content": "a" },
            { "content": "orphan" },
            { "id": "r3" }
        ],
        "total": 3
    }));

    let ids: Vec<&str> = reports.iter().map(|r| r.report_id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3"]);
}

/// **VALUE**: Verifies an upload response without an id is a shape error.
///
/// **WHY THIS MATTERS**: Generation needs the file id; an empty id would send
/// the next request to a nonsense path.
#[test]
fn given_upload_response_without_id_when_normalizing_then_shape_error() {
    let error = normalize_uploaded(&json!({ "message": "ok" })).unwrap_err();
    assert_eq!(error.kind(), FailureKind::Shape);

    let uploaded = normalize_uploaded(&json!({ "file_id": "f1", "s3_url": "s3://b/f1" })).unwrap();
    assert_eq!(uploaded.file_id, "f1");
    assert_eq!(uploaded.storage_url.as_deref(), Some("s3://b/f1"));
}

#[test]
fn given_generate_response_when_normalizing_then_report_id_required() {
    assert_eq!(normalize_generated(&json!({ "report_id": "r1" })).unwrap().report_id, "r1");
    assert_eq!(
        normalize_generated(&json!({ "report_id": "" })).unwrap_err().kind(),
        FailureKind::Shape
    );
}

#[test]
fn given_update_response_when_normalizing_then_acknowledged() {
    let ack = normalize_acknowledgement(&json!({ "message": "Report updated successfully" }));
    assert_eq!(ack.message.as_deref(), Some("Report updated successfully"));
    assert!(ack.report_id.is_none());

    assert_eq!(normalize_acknowledgement(&Value::Null).message, None);
}
