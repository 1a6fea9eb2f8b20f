// Unit tests for comparison normalization

use crate::normalizer::{derive_summary, normalize_comparison, normalize_model_output};

use serde_json::{Value, json};

#[test]
fn given_model_comparison_when_normalizing_then_outputs_in_order() {
    let result = normalize_comparison(&json!({
        "comparisons": [
            { "model_id": "m1", "model_name": "Claude", "content": "# A\nFirst line." },
            { "model_id": "m2", "content": "Only text", "error": null },
            { "model_id": "m3", "error": "quota exceeded" }
        ],
        "analysis": "m1 is longer"
    }));

    assert_eq!(result.comparisons.len(), 3);
    assert_eq!(result.comparisons[0].model_name, "Claude");
    assert_eq!(result.comparisons[0].summary.as_deref(), Some("First line."));
    assert_eq!(result.comparisons[1].model_name, "m2");
    assert!(!result.comparisons[1].is_failed());
    assert!(result.comparisons[2].is_failed());
    assert_eq!(result.analysis.as_deref(), Some("m1 is longer"));
    assert!(!result.is_fallback());
}

/// **VALUE**: Verifies the flat report-comparison shape becomes one output.
///
/// **BUG THIS CATCHES**: Treating a payload without `comparisons` as empty
/// would make every report comparison look like a failure.
#[test]
fn given_flat_report_comparison_when_normalizing_then_single_output() {
    let result = normalize_comparison(&json!({
        "report_id": "r9",
        "content": "# Alt\nThe alternate view.",
        "model_id": "m2",
        "model_name": "GPT",
        "original_model_id": "m1"
    }));

    assert_eq!(result.comparisons.len(), 1);
    let output = &result.comparisons[0];
    assert_eq!(output.model_id, "m2");
    assert_eq!(output.model_name, "GPT");
    assert_eq!(output.summary.as_deref(), Some("The alternate view."));
    assert!(result.analysis.is_none());
}

#[test]
fn given_malformed_comparison_when_normalizing_then_empty_result() {
    for payload in [
        Value::Null,
        json!({}),
        json!({ "comparisons": "m1" }),
        json!({ "comparisons": null }),
    ] {
        let result = normalize_comparison(&payload);
        assert!(result.comparisons.is_empty(), "payload {payload} should give no outputs");
    }
}

#[test]
fn given_non_object_entries_when_normalizing_then_skipped() {
    let result = normalize_comparison(&json!({ "comparisons": ["m1", { "model_id": "m2" }] }));

    assert_eq!(result.comparisons.len(), 1);
    assert_eq!(result.comparisons[0].model_id, "m2");
}

#[test]
fn given_alias_fields_when_normalizing_output_then_folded() {
    let output = normalize_model_output(&json!({
        "modelId": "m5",
        "name": "Llama",
        "report": "Body",
        "summary": "Given summary"
    }));

    assert_eq!(output.model_id, "m5");
    assert_eq!(output.model_name, "Llama");
    assert_eq!(output.content, "Body");
    assert_eq!(output.summary.as_deref(), Some("Given summary"));
}

#[test]
fn given_markdown_when_deriving_summary_then_first_prose_line() {
    let content = "# Title\n\n- bullet\n• dot\n1. step\nRevenue grew 12%.\nMore text";
    assert_eq!(derive_summary(content).as_deref(), Some("Revenue grew 12%."));
}

#[test]
fn given_only_structure_when_deriving_summary_then_truncated_head() {
    let long = format!("# {}", "x".repeat(150));
    let summary = derive_summary(&long).unwrap();

    assert_eq!(summary.chars().count(), 103);
    assert!(summary.ends_with("..."));

    assert_eq!(derive_summary("# Short").as_deref(), Some("# Short"));
    assert_eq!(derive_summary("  \n "), None);
}
