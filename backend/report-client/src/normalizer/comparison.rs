use super::{field, text};

use models::{ComparisonResult, ModelOutput};

use log::warn;
use serde_json::Value;

const SUMMARY_FALLBACK_CHARS: usize = 100;

/// Normalize either comparison shape the service produces:
///
/// - `{"comparisons": [...], "analysis": "..."}` from model comparison
/// - a single flat output (`content`, `model_id`, ...) from report comparison
pub fn normalize_comparison(payload: &Value) -> ComparisonResult {
    let comparisons = match field(payload, &["comparisons"]) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| entry.is_object())
            .map(normalize_model_output)
            .collect(),
        Some(other) => {
            warn!("comparisons is not an array, using an empty list: {other}");
            Vec::new()
        }
        None if field(payload, &["content"]).is_some() => vec![normalize_model_output(payload)],
        None => {
            warn!("Comparison payload has no comparisons, using an empty list");
            Vec::new()
        }
    };

    ComparisonResult {
        comparisons,
        analysis: text(payload, &["analysis"]),
        error: text(payload, &["error"]),
    }
}

pub fn normalize_model_output(entry: &Value) -> ModelOutput {
    let model_id = text(entry, &["model_id", "modelId", "id"]).unwrap_or_default();
    let model_name = text(entry, &["model_name", "name"]).unwrap_or_else(|| model_id.clone());
    let content = text(entry, &["content", "report"]).unwrap_or_default();
    let summary = text(entry, &["summary"]).or_else(|| derive_summary(&content));

    ModelOutput {
        model_id,
        model_name,
        content,
        summary,
        error: text(entry, &["error"]),
    }
}

/// First prose line of a markdown body, skipping headings and list items.
/// Falls back to the first 100 characters when the body is all structure.
pub fn derive_summary(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }

    let prose = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !is_structural(line));

    if let Some(line) = prose {
        return Some(line.to_string());
    }

    let mut chars = content.chars();
    let head: String = chars.by_ref().take(SUMMARY_FALLBACK_CHARS).collect();
    if chars.next().is_some() {
        Some(format!("{head}..."))
    } else {
        Some(head)
    }
}

fn is_structural(line: &str) -> bool {
    if line.starts_with('#') || line.starts_with('-') || line.starts_with('•') {
        return true;
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with('.')
}
