use crate::helpers::{api_path, client_for, unreachable_client};

use report_client::FailureKind;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies errors raised deep inside the client still carry a
/// source location in their Display output.
///
/// **WHY THIS MATTERS**: Log lines only show the rendered error; without the
/// location there is no way to tell which call site produced it.
#[tokio::test]
async fn given_server_error_when_formatted_then_includes_location() {
    // GIVEN: A service rejecting the request
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("model/list")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .mount(&server)
        .await;

    // WHEN: Formatting the resulting error
    let error = client_for(&server).models().await.unwrap_err();
    let rendered = error.to_string();

    // THEN: Status, message and location are all present
    assert!(rendered.contains("Server Error: HTTP 401 - Unauthorized"));
    assert!(rendered.contains(".rs:"));
    assert_eq!(error.error_category(), "client_error");
}

#[tokio::test]
async fn given_refused_connection_when_classified_then_network_without_status() {
    let error = unreachable_client(0).models().await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::Network);
    assert_eq!(error.status_code(), None);
    assert!(!error.is_timeout());
    assert!(error.to_string().starts_with("Network Error:"));
}

#[tokio::test]
async fn given_invalid_report_id_when_fetching_then_user_input_without_request() {
    let server = MockServer::start().await;

    let error = client_for(&server).report("../files").await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::UserInput);
    assert!(error.user_message().contains("report_id"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

/// **VALUE**: Verifies dot segments are refused as identifiers.
///
/// **BUG THIS CATCHES**: URL joining collapsing `report/..` into the API
/// root, so the request lands on a different endpoint than the one named.
#[tokio::test]
async fn given_dot_segment_report_id_when_fetching_then_user_input_without_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    for id in ["..", ".", "%2E%2e", ".%2e"] {
        let error = client.report(id).await.unwrap_err();

        assert_eq!(error.kind(), FailureKind::UserInput, "id {id:?}");
        assert!(error.user_message().contains("report_id"), "id {id:?}");
    }
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
