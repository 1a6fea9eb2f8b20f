use crate::helpers::{api_path, client_for, received_count};

use report_client::FailureKind;

use models::FileUploadBuilder;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies uploads are sent as multipart with the file and its
/// category, and the returned id is surfaced.
///
/// **BUG THIS CATCHES**: The client's default JSON content type leaking onto
/// the multipart request, which the service would reject.
#[tokio::test]
async fn given_valid_upload_when_uploading_then_returns_file_id() {
    // GIVEN: A service accepting uploads
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("upload")))
        .and(body_string_contains(r#"name="file"; filename="q3.pdf""#))
        .and(body_string_contains(r#"name="category""#))
        .and(body_string_contains("finance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_id": "f1",
            "s3_url": "s3://bucket/f1",
            "message": "File uploaded successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = FileUploadBuilder::default()
        .with_file("q3.pdf", b"%PDF-1.7".to_vec())
        .with_category("finance")
        .with_content_type("application/pdf")
        .build()
        .unwrap();

    // WHEN: Uploading
    let uploaded = client_for(&server).upload(&upload).await.unwrap();

    // THEN: The file id comes back
    assert_eq!(uploaded.file_id, "f1");
    assert_eq!(uploaded.storage_url.as_deref(), Some("s3://bucket/f1"));
}

#[tokio::test]
async fn given_upload_response_without_id_when_uploading_then_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("upload")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let upload = FileUploadBuilder::default()
        .with_file("q3.pdf", vec![1, 2, 3])
        .with_category("finance")
        .build()
        .unwrap();

    let error = client_for(&server).upload(&upload).await.unwrap_err();

    assert_eq!(error.kind(), FailureKind::Shape);
    assert_eq!(received_count(&server).await, 1);
}

#[tokio::test]
async fn given_rejected_upload_when_uploading_then_server_message_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("upload")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "File type not allowed" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let upload = FileUploadBuilder::default()
        .with_file("virus.exe", vec![0x4d, 0x5a])
        .with_category("finance")
        .build()
        .unwrap();

    let error = client_for(&server).upload(&upload).await.unwrap_err();

    assert_eq!(error.status_code(), Some(400));
    assert_eq!(error.user_message(), "File type not allowed");
}

#[tokio::test]
async fn given_category_list_when_fetching_then_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("upload/categories")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "finance", "name": "Finance" },
            { "id": "legal", "name": "Legal" }
        ])))
        .mount(&server)
        .await;

    let categories = client_for(&server).categories().await.unwrap();

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Finance", "Legal"]);
}

#[tokio::test]
async fn given_undecodable_categories_when_fetching_then_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("upload/categories")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let categories = client_for(&server).categories().await.unwrap();

    assert!(categories.is_empty());
}
