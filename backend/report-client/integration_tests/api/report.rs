use crate::helpers::{api_path, client_for, received_count};

use report_client::FailureKind;

use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_uploaded_file_when_generating_then_returns_report_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({ "file_id": "f1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "report_id": "r1",
            "status": "completed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generated = client_for(&server)
        .generate_report("f1", None, None)
        .await
        .unwrap();

    assert_eq!(generated.report_id, "r1");
}

#[tokio::test]
async fn given_prompt_and_model_when_generating_then_both_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({
            "file_id": "f1",
            "prompt": "Focus on risks",
            "model_id": "m2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r2" })))
        .expect(1)
        .mount(&server)
        .await;

    let generated = client_for(&server)
        .generate_report("f1", Some("Focus on risks"), Some("m2"))
        .await
        .unwrap();

    assert_eq!(generated.report_id, "r2");
}

#[tokio::test]
async fn given_missing_file_id_when_generating_then_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .generate_report("  ", None, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), FailureKind::UserInput);
}

#[tokio::test]
async fn given_existing_report_when_fetching_then_content_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "report_id": "r1",
            "file_id": "f1",
            "content": "# R1",
            "model_id": "m1"
        })))
        .mount(&server)
        .await;

    let report = client_for(&server).report("r1").await.unwrap();

    assert_eq!(report.report_id, "r1");
    assert_eq!(report.content, "# R1");
    assert_eq!(report.model_id.as_deref(), Some("m1"));
}

/// **VALUE**: Verifies a 404 surfaces the service's own message after one
/// attempt.
///
/// **BUG THIS CATCHES**: Retrying client errors, or showing the raw JSON
/// body instead of its `error` text.
#[tokio::test]
async fn given_missing_report_when_fetching_then_not_found_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/nope")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Report not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).report("nope").await.unwrap_err();

    assert_eq!(error.status_code(), Some(404));
    assert_eq!(error.user_message(), "Report not found");
}

#[tokio::test]
async fn given_empty_body_when_fetching_report_then_empty_report_with_requested_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = client_for(&server).report("r1").await.unwrap();

    assert_eq!(report.report_id, "r1");
    assert_eq!(report.content, "");
    assert!(report.key_points.is_empty());
}

#[tokio::test]
async fn given_edited_content_when_updating_then_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(api_path("report/r1")))
        .and(body_json(json!({ "content": "# Edited" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Report updated successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server).update_report("r1", "# Edited").await.unwrap();

    assert_eq!(ack.message.as_deref(), Some("Report updated successfully"));
}

#[tokio::test]
async fn given_regenerate_when_called_then_new_report_replaces_old() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("report/r1/regenerate")))
        .and(body_json(json!({ "prompt": "Shorter" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "report_id": "r1",
            "content": "# Shorter R1",
            "key_points": ["one"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server)
        .regenerate_report("r1", Some("Shorter"), None)
        .await
        .unwrap();

    assert_eq!(report.content, "# Shorter R1");
    assert_eq!(report.key_points, vec!["one"]);
}

#[tokio::test]
async fn given_report_listing_when_fetching_then_unopenable_entries_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/list")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "report_id": "r1", "file_id": "f1" },
                { "file_id": "f2" },
                { "report_id": "r3", "file_id": "f3" }
            ],
            "total": 3
        })))
        .mount(&server)
        .await;

    let reports = client_for(&server).reports().await.unwrap();

    let ids: Vec<&str> = reports.iter().map(|r| r.report_id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3"]);
}

#[tokio::test]
async fn given_report_and_model_when_comparing_then_flat_output_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .and(body_json(json!({ "report_id": "r1", "model_id": "m2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "# Alt\nA different angle.",
            "model_id": "m2",
            "model_name": "GPT",
            "original_model_id": "m1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).compare_reports("r1", "m2").await.unwrap();

    assert_eq!(result.comparisons.len(), 1);
    assert_eq!(result.comparisons[0].model_name, "GPT");
    assert_eq!(result.comparisons[0].summary.as_deref(), Some("A different angle."));
}

#[tokio::test]
async fn given_no_model_when_comparing_report_then_user_input_without_request() {
    let server = MockServer::start().await;

    let error = client_for(&server).compare_reports("r1", "").await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::UserInput);
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn given_comparison_server_error_when_comparing_report_then_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Model unavailable" })))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).compare_reports("r1", "m2").await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::Server);
    assert_eq!(error.user_message(), "Model unavailable");
}
