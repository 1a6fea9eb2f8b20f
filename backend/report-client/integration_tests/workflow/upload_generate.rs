use crate::helpers::{api_path, client_for, received_count};

use report_client::FailureKind;
use report_client::workflow::{UploadAndGenerate, UploadFlowState, UploadStep};

use models::{FileUploadBuilder, GeneratedReport};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upload_of(filename: &str) -> FileUploadBuilder {
    FileUploadBuilder::default()
        .with_file(filename, b"quarterly numbers".to_vec())
        .with_category("finance")
}

async fn mount_upload(server: &MockServer, filename: &str, file_id: &str, delay: Duration) {
    Mock::given(method("POST"))
        .and(path(api_path("upload")))
        .and(body_string_contains(filename))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "file_id": file_id }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the happy path ends in `Succeeded` with the id of
/// the generated report, and that report can then be opened.
#[tokio::test]
async fn given_valid_document_when_running_then_succeeds_with_report_id() {
    // GIVEN: A service that accepts the upload and generates report r1
    let server = MockServer::start().await;
    mount_upload(&server, "report.txt", "f1", Duration::ZERO).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({ "file_id": "f1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1", "content": "# R1" })),
        )
        .mount(&server)
        .await;

    let api = client_for(&server);
    let flow = UploadAndGenerate::new(api.clone());
    let receiver = flow.subscribe();

    // WHEN: Running the flow
    let finished = flow
        .run(
            FileUploadBuilder::default()
                .with_file("report.txt", b"Minutes of the meeting".to_vec())
                .with_category("meeting"),
        )
        .await;

    // THEN: The flow and its observers see the generated report
    assert!(matches!(finished, UploadFlowState::Succeeded(ref g) if g.report_id == "r1"));
    assert_eq!(flow.outcome(), Some(GeneratedReport::new("r1")));
    assert!(matches!(*receiver.borrow(), UploadFlowState::Succeeded(_)));
    assert!(flow.last_error().is_none());

    let report = api.report("r1").await.unwrap();
    assert_eq!(report.content, "# R1");
}

#[tokio::test]
async fn given_invalid_upload_when_running_then_fails_without_network() {
    let server = MockServer::start().await;
    let flow = UploadAndGenerate::new(client_for(&server));

    let finished = flow.run(FileUploadBuilder::default().with_file("q3.pdf", Vec::new())).await;

    match finished {
        UploadFlowState::Failed {
            step,
            error,
            file_id,
        } => {
            assert_eq!(step, UploadStep::Upload);
            assert_eq!(error.kind(), FailureKind::UserInput);
            assert_eq!(error.user_message(), "File 'q3.pdf' is empty");
            assert!(file_id.is_none());
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(flow.state().tag(), "failed");
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn given_upload_rejected_when_running_then_generation_never_attempted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("upload")))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({ "error": "File too large" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let flow = UploadAndGenerate::new(client_for(&server));
    flow.run(upload_of("huge.pdf")).await;

    let error = flow.last_error().unwrap();
    assert_eq!(error.status_code(), Some(413));
    assert!(flow.uploaded_file_id().is_none());
}

/// **VALUE**: Verifies a generation failure keeps the uploaded file and
/// `retry_generation` finishes the flow without uploading again.
///
/// **BUG THIS CATCHES**: Discarding the file id on failure, which would force
/// a duplicate upload.
#[tokio::test]
async fn given_generation_fails_when_retried_then_reuses_uploaded_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api_path("upload")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "file_id": "f1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Model timeout" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({ "file_id": "f1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1" })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = UploadAndGenerate::new(client_for(&server));

    match flow.run(upload_of("q3.pdf")).await {
        UploadFlowState::Failed {
            step,
            error,
            file_id,
        } => {
            assert_eq!(step, UploadStep::Generate);
            assert_eq!(error.user_message(), "Model timeout");
            assert_eq!(file_id.as_deref(), Some("f1"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(flow.uploaded_file_id().as_deref(), Some("f1"));

    let retried = flow.retry_generation().await;

    assert!(matches!(retried, UploadFlowState::Succeeded(ref g) if g.report_id == "r1"));
}

#[tokio::test]
async fn given_nothing_uploaded_when_retrying_generation_then_user_input() {
    let server = MockServer::start().await;
    let flow = UploadAndGenerate::new(client_for(&server));

    let state = flow.retry_generation().await;

    assert!(matches!(state, UploadFlowState::Failed { step: UploadStep::Generate, .. }));
    assert_eq!(flow.last_error().unwrap().kind(), FailureKind::UserInput);
    assert_eq!(received_count(&server).await, 0);
}

/// **VALUE**: Verifies the latest trigger wins when two runs overlap.
///
/// **WHY THIS MATTERS**: A user who picks a second file while the first is
/// still uploading must end up on the second file's report.
///
/// **BUG THIS CATCHES**: The slow first upload finishing last and generating
/// (and publishing) a report for the file the user abandoned.
#[tokio::test]
async fn given_overlapping_runs_when_first_finishes_last_then_second_wins() {
    let server = MockServer::start().await;
    mount_upload(&server, "first.pdf", "f1", Duration::from_millis(500)).await;
    mount_upload(&server, "second.pdf", "f2", Duration::ZERO).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({ "file_id": "f2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r2" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({ "file_id": "f1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1" })))
        .expect(0)
        .mount(&server)
        .await;

    let flow = UploadAndGenerate::new(client_for(&server));

    let (first, second) = tokio::join!(
        flow.run(upload_of("first.pdf")),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flow.run(upload_of("second.pdf")).await
        }
    );

    assert!(matches!(second, UploadFlowState::Succeeded(ref g) if g.report_id == "r2"));
    assert!(!first.is_terminal());
    assert_eq!(flow.outcome(), Some(GeneratedReport::new("r2")));
}

/// **VALUE**: Verifies a trigger rejected by validation leaves the run in
/// flight alone.
///
/// **WHY THIS MATTERS**: Clicking "upload" again with no file selected must
/// not make the document already being uploaded disappear from the view.
///
/// **BUG THIS CATCHES**: The rejected trigger starting a run of its own, so
/// the valid upload's report is generated but never published.
#[tokio::test]
async fn given_run_in_flight_when_invalid_upload_triggered_then_valid_run_still_publishes() {
    // GIVEN: A slow upload of q3.pdf that generates report r1
    let server = MockServer::start().await;
    mount_upload(&server, "q3.pdf", "f1", Duration::from_millis(300)).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .and(body_json(json!({ "file_id": "f1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1" })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = UploadAndGenerate::new(client_for(&server));

    // WHEN: A builder with no file is run while q3.pdf is uploading
    let (valid, invalid) = tokio::join!(flow.run(upload_of("q3.pdf")), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let rejected = flow.run(FileUploadBuilder::default()).await;
        assert_eq!(flow.state().tag(), "uploading");
        rejected
    });

    // THEN: The caller sees the rejection, the flow keeps the valid run
    match invalid {
        UploadFlowState::Failed { step, error, .. } => {
            assert_eq!(step, UploadStep::Upload);
            assert_eq!(error.kind(), FailureKind::UserInput);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(matches!(valid, UploadFlowState::Succeeded(ref g) if g.report_id == "r1"));
    assert_eq!(flow.outcome(), Some(GeneratedReport::new("r1")));
    assert!(flow.last_error().is_none());
}

#[tokio::test]
async fn given_upload_in_flight_when_retrying_generation_then_upload_continues() {
    let server = MockServer::start().await;
    mount_upload(&server, "q3.pdf", "f1", Duration::from_millis(300)).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/generate")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "report_id": "r1" })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = UploadAndGenerate::new(client_for(&server));

    let (valid, retried) = tokio::join!(flow.run(upload_of("q3.pdf")), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        flow.retry_generation().await
    });

    assert!(matches!(retried, UploadFlowState::Failed { step: UploadStep::Generate, .. }));
    assert_eq!(valid.tag(), "succeeded");
    assert_eq!(flow.outcome(), Some(GeneratedReport::new("r1")));
}
