use super::{field, list_items, text, text_list};
use crate::error::ClientError;

use models::{Acknowledgement, GeneratedReport, Report, UploadedFile};

use log::warn;
use serde_json::Value;

pub fn normalize_report(payload: &Value) -> Report {
    if !payload.is_object() {
        warn!("Report payload is not an object, using an empty report: {payload}");
    }

    let sections = field(payload, &["sections"]);
    let summary = text(payload, &["summary"])
        .or_else(|| sections.and_then(|s| text(s, &["summary"])))
        .unwrap_or_default();

    Report {
        report_id: text(payload, &["report_id", "id"]).unwrap_or_default(),
        file_id: text(payload, &["file_id"]).unwrap_or_default(),
        title: text(payload, &["title"]),
        content: text(payload, &["content"]).unwrap_or_default(),
        summary,
        key_points: text_list(payload, &["key_points", "keyPoints"]),
        recommendations: text_list(payload, &["recommendations"]),
        model_id: text(payload, &["model_id", "modelId"]),
        model_name: text(payload, &["model_name", "modelName"]),
        status: text(payload, &["status"]),
        created_at: text(payload, &["created_at", "generated_at"]),
    }
}

/// Report listing. Entries without a report id cannot be opened and are
/// dropped.
pub fn normalize_report_list(payload: &Value) -> Vec<Report> {
    list_items(payload, &["items", "reports"])
        .iter()
        .map(normalize_report)
        .filter(|report| {
            let keep = !report.report_id.is_empty();
            if !keep {
                warn!("Dropping report list entry without report_id");
            }
            keep
        })
        .collect()
}

#[track_caller]
pub fn normalize_uploaded(payload: &Value) -> Result<UploadedFile, ClientError> {
    let file_id = text(payload, &["file_id", "id"])
        .ok_or_else(|| ClientError::shape("Upload response did not include a file_id"))?;

    Ok(UploadedFile {
        file_id,
        storage_url: text(payload, &["s3_url", "url"]),
    })
}

#[track_caller]
pub fn normalize_generated(payload: &Value) -> Result<GeneratedReport, ClientError> {
    let report_id = text(payload, &["report_id", "id"])
        .ok_or_else(|| ClientError::shape("Generate response did not include a report_id"))?;

    Ok(GeneratedReport::new(report_id))
}

pub fn normalize_acknowledgement(payload: &Value) -> Acknowledgement {
    Acknowledgement {
        message: text(payload, &["message"]),
        report_id: text(payload, &["report_id", "id"]),
    }
}
