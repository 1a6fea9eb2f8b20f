use crate::{ComparisonResult, ModelOutput, NO_ANALYSIS_AVAILABLE, Report};

#[test]
fn given_missing_analysis_when_rendering_then_uses_placeholder_text() {
    let result = ComparisonResult::default();

    assert_eq!(result.analysis_text(), NO_ANALYSIS_AVAILABLE);
    assert!(!result.is_fallback());
}

/// **VALUE**: The fallback result is what the comparison screen renders instead of crashing.
///
/// **WHY THIS MATTERS**: The view branches on an empty comparison list plus a readable
/// analysis line; both must be present together.
#[test]
fn given_failure_message_when_building_fallback_then_carries_empty_list_and_summary() {
    let result = ComparisonResult::failed("connection reset");

    assert!(result.comparisons.is_empty());
    assert_eq!(result.analysis_text(), "Comparison failed: connection reset");
    assert_eq!(result.error.as_deref(), Some("connection reset"));
    assert!(result.is_fallback());
}

#[test]
fn given_report_without_model_name_when_converted_then_falls_back_to_model_id() {
    let report = Report {
        report_id: String::from("r1"),
        content: String::from("# R1"),
        model_id: Some(String::from("m1")),
        ..Report::default()
    };

    let output = ModelOutput::from_report(&report);

    assert_eq!(output.model_id, "m1");
    assert_eq!(output.model_name, "m1");
    assert_eq!(output.content, "# R1");
    assert_eq!(output.summary, None);
}

#[test]
fn given_output_when_serialized_then_uses_service_field_names() {
    let output = ModelOutput {
        model_id: String::from("m2"),
        model_name: String::from("Model Two"),
        content: String::from("body"),
        summary: None,
        error: None,
    };

    let json = serde_json::to_value(&output).expect("serializable");

    assert_eq!(json["model_id"], "m2");
    assert_eq!(json["model_name"], "Model Two");
}
