use crate::helpers::{api_path, client_for, received_count, unreachable_client};

use report_client::FailureKind;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn given_model_list_when_fetching_then_every_entry_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("model/list")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "m1", "name": "Claude", "provider": "anthropic" },
                { "id": "m2", "name": "GPT", "provider": "openai" },
                { "name": "Unnamed" }
            ]
        })))
        .mount(&server)
        .await;

    let models = client_for(&server).models().await.unwrap();

    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "unknown"]);
}

#[tokio::test]
async fn given_two_models_when_comparing_then_outputs_and_analysis_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("model/compare")))
        .and(body_json(json!({ "file_id": "f1", "model_ids": ["m1", "m2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comparisons": [
                { "model_id": "m1", "model_name": "Claude", "content": "# A\nAlpha." },
                { "model_id": "m2", "model_name": "GPT", "content": "# B\nBeta." }
            ],
            "analysis": "Both agree on revenue"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .compare_models("f1", &ids(&["m1", "m2"]), None)
        .await
        .unwrap();

    assert!(!result.is_fallback());
    assert_eq!(result.comparisons.len(), 2);
    assert_eq!(result.comparisons[1].summary.as_deref(), Some("Beta."));
    assert_eq!(result.analysis_text(), "Both agree on revenue");
}

#[tokio::test]
async fn given_fewer_than_two_models_when_comparing_then_user_input_without_request() {
    let server = MockServer::start().await;

    let error = client_for(&server)
        .compare_models("f1", &ids(&["m1"]), None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), FailureKind::UserInput);
    assert_eq!(received_count(&server).await, 0);
}

/// **VALUE**: Verifies a failed comparison is folded into a renderable
/// fallback result rather than an error.
///
/// **WHY THIS MATTERS**: The comparison screen always has something to show:
/// no outputs plus an analysis explaining what went wrong.
#[tokio::test]
async fn given_server_error_when_comparing_models_then_fallback_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("model/compare")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Bedrock throttled" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .compare_models("f1", &ids(&["m1", "m2"]), Some("Be brief"))
        .await
        .unwrap();

    assert!(result.is_fallback());
    assert!(result.comparisons.is_empty());
    assert_eq!(result.error.as_deref(), Some("Bedrock throttled"));
    assert_eq!(result.analysis_text(), "Comparison failed: Bedrock throttled");
}

#[tokio::test]
async fn given_unreachable_service_when_comparing_models_then_fallback_result() {
    let result = unreachable_client(1)
        .compare_models("f1", &ids(&["m1", "m2"]), None)
        .await
        .unwrap();

    assert!(result.is_fallback());
    assert!(result.comparisons.is_empty());
}

#[tokio::test]
async fn given_non_object_payload_when_comparing_models_then_malformed_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("model/compare")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["m1", "m2"])))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .compare_models("f1", &ids(&["m1", "m2"]), None)
        .await
        .unwrap();

    assert!(result.is_fallback());
    assert_eq!(
        result.error.as_deref(),
        Some("The comparison response was empty or malformed")
    );
}
