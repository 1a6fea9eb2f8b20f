use crate::helpers::{api_path, client_for, impatient_client_for, unreachable_client};

use report_client::FailureKind;

use models::FileQuery;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_category_filter_when_listing_then_query_sent_with_default_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("files")))
        .and(query_param("category", "finance"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "file_id": "f1", "original_filename": "q3.pdf", "category": "finance" },
                { "file_id": "f2", "original_filename": "q4.pdf", "category": "finance" }
            ],
            "last_evaluated_key": "f2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server)
        .files(&FileQuery::default().with_category("finance"))
        .await
        .unwrap();

    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[1].original_filename, "q4.pdf");
    assert_eq!(list.last_evaluated_key.as_deref(), Some("f2"));
}

#[tokio::test]
async fn given_cursor_when_listing_next_page_then_cursor_echoed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("files")))
        .and(query_param("limit", "10"))
        .and(query_param("last_key", "f2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server)
        .files(&FileQuery::default().with_limit(10).with_last_key("f2"))
        .await
        .unwrap();

    assert!(list.items.is_empty());
    assert!(list.last_evaluated_key.is_none());
}

/// **VALUE**: Verifies an unreachable service yields an empty listing once
/// retries are exhausted.
///
/// **WHY THIS MATTERS**: The document list is a browsing view; it shows an
/// empty state rather than an error banner when the service is down.
#[tokio::test]
async fn given_unreachable_service_when_listing_then_empty_list() {
    let list = unreachable_client(2)
        .files(&FileQuery::default())
        .await
        .unwrap();

    assert!(list.items.is_empty());
    assert!(list.last_evaluated_key.is_none());
}

#[tokio::test]
async fn given_slow_service_when_listing_then_timeout_degrades_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("files")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [{ "file_id": "late" }] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let list = impatient_client_for(&server, 0)
        .files(&FileQuery::default())
        .await
        .unwrap();

    assert!(list.items.is_empty());
}

/// **VALUE**: Verifies the empty-list fallback does not hide server errors.
///
/// **BUG THIS CATCHES**: Widening the fallback to every failure, which would
/// make a misconfigured endpoint look like an empty account.
#[tokio::test]
async fn given_server_error_when_listing_then_error_surfaces_after_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("files")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Scan failed" })))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .files(&FileQuery::default())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), FailureKind::Server);
    assert_eq!(error.user_message(), "Scan failed");
}

#[tokio::test]
async fn given_non_json_body_when_listing_then_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("files")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let list = client_for(&server)
        .files(&FileQuery::default())
        .await
        .unwrap();

    assert!(list.items.is_empty());
}
