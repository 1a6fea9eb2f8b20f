// Unit tests for error classification

use crate::error::{ClientError, FailureKind};

use models::FileUploadBuilder;

#[test]
fn given_json_error_body_when_creating_server_error_then_uses_error_field() {
    let error = ClientError::from_http_response(500, r#"{"error": "Model quota exceeded"}"#);

    assert_eq!(error.kind(), FailureKind::Server);
    assert_eq!(error.status_code(), Some(500));
    assert_eq!(error.user_message(), "Model quota exceeded");
}

#[test]
fn given_message_field_when_creating_server_error_then_uses_message() {
    let error = ClientError::from_http_response(404, r#"{"message": "Report not found"}"#);
    assert_eq!(error.user_message(), "Report not found");
}

#[test]
fn given_plain_text_body_when_creating_server_error_then_uses_trimmed_body() {
    let error = ClientError::from_http_response(502, "  Bad gateway upstream \n");
    assert_eq!(error.user_message(), "Bad gateway upstream");
}

#[test]
fn given_empty_body_when_creating_server_error_then_uses_reason_phrase() {
    assert_eq!(ClientError::from_http_response(503, "").user_message(), "Service Unavailable");
    assert_eq!(ClientError::from_http_response(599, "").user_message(), "Unknown status");
}

/// **VALUE**: Verifies classification is fixed at construction.
///
/// **BUG THIS CATCHES**: A server message mentioning "timeout" must not make
/// a 504 look like a retryable network failure.
#[test]
fn given_server_message_mentioning_timeout_when_classifying_then_still_server() {
    let error = ClientError::from_http_response(504, r#"{"error": "upstream timeout"}"#);

    assert_eq!(error.kind(), FailureKind::Server);
    assert!(!error.is_retryable());
    assert!(!error.is_timeout());
    assert_eq!(error.error_category(), "server_error");
}

#[test]
fn given_network_errors_when_categorizing_then_flags_reported() {
    let timeout = ClientError::network("operation timed out", true, false);
    let refused = ClientError::network("connection refused", false, true);

    assert!(timeout.is_timeout());
    assert!(timeout.is_retryable());
    assert_eq!(timeout.error_category(), "timeout");
    assert_eq!(refused.error_category(), "connection");
    assert_eq!(refused.status_code(), None);
}

#[test]
fn given_client_status_when_categorizing_then_client_error() {
    let error = ClientError::from_http_response(400, r#"{"error": "No file provided"}"#);
    assert_eq!(error.error_category(), "client_error");
}

#[test]
fn given_validation_failure_when_converted_then_user_input() {
    let validation = FileUploadBuilder::default()
        .with_file("q3.pdf", vec![1, 2, 3])
        .build()
        .unwrap_err();
    let error: ClientError = validation.into();

    assert_eq!(error.kind(), FailureKind::UserInput);
    assert_eq!(error.user_message(), "No file category selected");
}

#[test]
fn given_invalid_json_when_converted_then_shape() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: ClientError = parse_error.into();

    assert_eq!(error.kind(), FailureKind::Shape);
}

#[test]
fn given_any_error_when_displayed_then_location_included() {
    let error = ClientError::shape("comparisons missing");
    let rendered = error.to_string();

    assert!(rendered.starts_with("Shape Error: comparisons missing"));
    assert!(rendered.contains("error.rs"));
}
