use crate::helpers::{api_path, client_for};

use report_client::api::ReportDownload;

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_attachment_when_downloading_then_name_type_and_bytes_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1/download")))
        .and(query_param("format", "s3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", r#"attachment; filename="q3-report.pdf""#)
                .set_body_raw(b"%PDF-1.7 report".to_vec(), "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let download = client_for(&server).download_report("r1").await.unwrap();

    assert_eq!(download.filename, "q3-report.pdf");
    assert_eq!(download.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(download.bytes, b"%PDF-1.7 report".to_vec());

    let dir = TempDir::new().unwrap();
    let saved = download.save_into(dir.path()).await.unwrap();
    assert_eq!(saved, dir.path().join("q3-report.pdf"));
    assert_eq!(std::fs::read(saved).unwrap(), b"%PDF-1.7 report".to_vec());
}

#[tokio::test]
async fn given_no_disposition_header_when_downloading_then_default_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r7/download")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"plain".to_vec()))
        .mount(&server)
        .await;

    let download = client_for(&server).download_report("r7").await.unwrap();

    assert_eq!(download.filename, "file_r7");
    assert_eq!(download.bytes, b"plain".to_vec());
}

#[tokio::test]
async fn given_missing_report_when_downloading_then_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r9/download")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Report not found"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).download_report("r9").await.unwrap_err();

    assert_eq!(error.status_code(), Some(404));
    assert_eq!(error.user_message(), "Report not found");
}

#[tokio::test]
async fn given_name_with_directories_when_saving_then_written_inside_target_dir() {
    let download = ReportDownload {
        filename: String::from("../escape.md"),
        content_type: None,
        bytes: b"# R1".to_vec(),
    };
    let dir = TempDir::new().unwrap();

    let saved = download.save_into(dir.path()).await.unwrap();

    assert_eq!(saved, dir.path().join("escape.md"));
}
