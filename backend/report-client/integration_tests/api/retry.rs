use crate::helpers::{api_path, client_for, impatient_client_for, unreachable_client};

use report_client::FailureKind;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies server errors are never retried, whatever the status.
///
/// **BUG THIS CATCHES**: Treating 502/503 as transient and re-sending a
/// request the service already answered.
#[tokio::test]
async fn given_service_unavailable_when_fetching_then_attempted_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).report("r1").await.unwrap_err();

    assert_eq!(error.status_code(), Some(503));
    assert_eq!(error.user_message(), "Service Unavailable");
}

/// **VALUE**: Verifies a timed-out attempt is retried and a later success
/// is returned to the caller.
#[tokio::test]
async fn given_first_attempt_times_out_when_fetching_then_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "report_id": "r1", "content": "# Late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1", "content": "# R1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = impatient_client_for(&server, 2).report("r1").await.unwrap();

    assert_eq!(report.content, "# R1");
}

#[tokio::test]
async fn given_every_attempt_times_out_when_fetching_then_timeout_error_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(2)
        .mount(&server)
        .await;

    let error = impatient_client_for(&server, 1).report("r1").await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::Network);
    assert!(error.is_timeout());
}

#[tokio::test]
async fn given_refused_connection_when_fetching_then_network_error() {
    let error = unreachable_client(2).report("r1").await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::Network);
    assert!(error.is_retryable());
    assert_eq!(error.error_category(), "connection");
}
