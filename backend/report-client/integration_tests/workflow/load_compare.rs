use crate::helpers::{api_path, client_for, received_count};

use report_client::FailureKind;
use report_client::workflow::{CompareFlowState, CompareStep, LoadAndCompare};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_base_report(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "report_id": "r1",
            "file_id": "f1",
            "content": "# Base\nBase view.",
            "model_id": "m1",
            "model_name": "Claude"
        })))
        .mount(server)
        .await;
}

async fn mount_models(server: &MockServer, models: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api_path("model/list")))
        .respond_with(ResponseTemplate::new(200).set_body_json(models))
        .mount(server)
        .await;
}

fn three_models() -> serde_json::Value {
    json!([
        { "id": "m1", "name": "Claude" },
        { "id": "m2", "name": "GPT" },
        { "id": "m3", "name": "Llama" }
    ])
}

/// **VALUE**: Verifies the model that produced the base report is excluded
/// and the first remaining candidate is preselected.
#[tokio::test]
async fn given_base_from_m1_when_loading_then_candidates_are_m2_and_m3() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, three_models()).await;

    let flow = LoadAndCompare::new(client_for(&server));
    let state = flow.load("r1").await;

    let CompareFlowState::Ready(loaded) = state else {
        panic!("expected Ready, got {state:?}");
    };
    let ids: Vec<&str> = loaded.candidates.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m2", "m3"]);
    assert_eq!(loaded.selected.as_deref(), Some("m2"));
    assert_eq!(loaded.base.content, "# Base\nBase view.");
}

#[tokio::test]
async fn given_only_base_model_when_loading_then_no_candidates_failure() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, json!([{ "id": "m1", "name": "Claude" }])).await;

    let flow = LoadAndCompare::new(client_for(&server));
    let state = flow.load("r1").await;

    match state {
        CompareFlowState::Failed {
            step,
            error,
            candidates,
        } => {
            assert_eq!(step, CompareStep::LoadModels);
            assert_eq!(error.kind(), FailureKind::UserInput);
            assert!(candidates.is_none());
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_missing_report_when_loading_then_fails_before_fetching_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r404")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Report not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));
    flow.load("r404").await;

    assert!(matches!(
        flow.state(),
        CompareFlowState::Failed {
            step: CompareStep::LoadBase,
            ..
        }
    ));
    assert_eq!(received_count(&server).await, 1);
}

#[tokio::test]
async fn given_loaded_candidates_when_selecting_then_only_known_models_accepted() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, three_models()).await;

    let flow = LoadAndCompare::new(client_for(&server));
    assert!(flow.select_model("m2").is_err());

    flow.load("r1").await;

    flow.select_model("m3").unwrap();
    assert_eq!(
        flow.state().candidates().and_then(|c| c.selected.clone()).as_deref(),
        Some("m3")
    );

    let error = flow.select_model("m1").unwrap_err();
    assert_eq!(error.kind(), FailureKind::UserInput);
    assert_eq!(
        flow.state().candidates().and_then(|c| c.selected.clone()).as_deref(),
        Some("m3")
    );
}

/// **VALUE**: Verifies a successful comparison shows the base report on the
/// left and the alternate on the right.
#[tokio::test]
async fn given_selected_model_when_comparing_then_base_and_alternate_paired() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, three_models()).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .and(body_json(json!({ "report_id": "r1", "model_id": "m3" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "# Alt\nAlternate view.",
            "model_id": "m3",
            "model_name": "Llama",
            "original_model_id": "m1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));
    flow.load("r1").await;
    flow.select_model("m3").unwrap();

    let state = flow.compare().await;

    assert_eq!(state.tag(), "succeeded");
    let view = flow.comparison().unwrap();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].left.model_id, "m1");
    assert_eq!(view.rows[0].left.summary.as_deref(), None);
    let right = view.rows[0].right.as_ref().unwrap();
    assert_eq!(right.model_id, "m3");
    assert_eq!(right.summary.as_deref(), Some("Alternate view."));
    assert_eq!(view.analysis, "No analysis available");
}

/// **VALUE**: Verifies a failed comparison keeps the loaded base report and
/// candidates so the user can retry or pick another model.
///
/// **BUG THIS CATCHES**: Resetting to `Idle` on failure, which would force
/// a full reload.
#[tokio::test]
async fn given_comparison_fails_when_comparing_then_loaded_data_retained() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, three_models()).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Model unavailable" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "Second try.",
            "model_id": "m2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));
    flow.load("r1").await;

    match flow.compare().await {
        CompareFlowState::Failed {
            step,
            error,
            candidates,
        } => {
            assert_eq!(step, CompareStep::Compare);
            assert_eq!(error.user_message(), "Model unavailable");
            let retained = candidates.unwrap();
            assert_eq!(retained.base.report_id, "r1");
            assert_eq!(retained.candidates.len(), 2);
            assert_eq!(retained.selected.as_deref(), Some("m2"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    let retried = flow.compare().await;

    assert_eq!(retried.tag(), "succeeded");
    assert_eq!(flow.comparison().unwrap().outputs.len(), 2);
}

#[tokio::test]
async fn given_nothing_loaded_when_comparing_then_user_input_without_request() {
    let server = MockServer::start().await;
    let flow = LoadAndCompare::new(client_for(&server));

    let state = flow.compare().await;

    assert!(matches!(
        state,
        CompareFlowState::Failed {
            step: CompareStep::Compare,
            candidates: None,
            ..
        }
    ));
    assert_eq!(flow.last_error().unwrap().kind(), FailureKind::UserInput);
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn given_comparison_without_alternate_output_when_comparing_then_shape_failure() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, three_models()).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));
    flow.load("r1").await;
    flow.compare().await;

    let error = flow.last_error().unwrap();
    assert_eq!(error.kind(), FailureKind::Shape);
    assert!(flow.state().candidates().is_some());
}

/// **VALUE**: Verifies pressing "compare" before the models arrive is
/// rejected without cancelling the load.
///
/// **BUG THIS CATCHES**: The rejected compare superseding the load, leaving
/// the view on a `Failed` state with no base report or candidates.
#[tokio::test]
async fn given_load_in_flight_when_comparing_then_load_still_reaches_ready() {
    // GIVEN: A base report and a slow model list
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    Mock::given(method("GET"))
        .and(path(api_path("model/list")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(three_models())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));

    // WHEN: Compare is triggered while the models are loading
    let (loaded, compared) = tokio::join!(flow.load("r1"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        flow.compare().await
    });

    // THEN: Compare is refused and the load publishes its candidates
    match compared {
        CompareFlowState::Failed { step, error, .. } => {
            assert_eq!(step, CompareStep::Compare);
            assert_eq!(error.kind(), FailureKind::UserInput);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(loaded.tag(), "ready");
    let state = flow.state();
    assert_eq!(state.tag(), "ready");
    assert_eq!(state.candidates().unwrap().base.report_id, "r1");
    assert!(flow.last_error().is_none());
}

/// **VALUE**: Verifies the latest `load` wins when two overlap.
///
/// **WHY THIS MATTERS**: Navigating from one report to another while the
/// first is still loading must show the second report's candidates.
///
/// **BUG THIS CATCHES**: The slow first report arriving last and replacing
/// the second report, or fetching models on its behalf.
#[tokio::test]
async fn given_overlapping_loads_when_first_finishes_last_then_second_wins() {
    // GIVEN: A slow report r1 by m1 and a fast report r2 by m2
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r1")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "report_id": "r1", "content": "# R1", "model_id": "m1" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("report/r2")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "report_id": "r2", "content": "# R2", "model_id": "m2" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("model/list")))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_models()))
        .expect(1)
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));

    // WHEN: r2 is loaded while r1 is still in flight
    let (first, second) = tokio::join!(flow.load("r1"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        flow.load("r2").await
    });

    // THEN: r2's candidates are published and r1 stops before the models
    assert_eq!(second.tag(), "ready");
    assert_eq!(first.tag(), "loading_models");
    let CompareFlowState::Ready(loaded) = flow.state() else {
        panic!("expected Ready, got {:?}", flow.state());
    };
    assert_eq!(loaded.base.report_id, "r2");
    let ids: Vec<&str> = loaded.candidates.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3"]);
}

#[tokio::test]
async fn given_comparison_in_flight_when_selecting_then_in_progress_error() {
    let server = MockServer::start().await;
    mount_base_report(&server).await;
    mount_models(&server, three_models()).await;
    Mock::given(method("POST"))
        .and(path(api_path("report/compare")))
        .and(body_json(json!({ "report_id": "r1", "model_id": "m2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "content": "Alternate view.", "model_id": "m2" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let flow = LoadAndCompare::new(client_for(&server));
    flow.load("r1").await;

    let (compared, selected) = tokio::join!(flow.compare(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        flow.select_model("m3")
    });

    let error = selected.unwrap_err();
    assert_eq!(error.kind(), FailureKind::UserInput);
    assert_eq!(error.user_message(), "A comparison is already in progress");
    assert_eq!(compared.tag(), "succeeded");
    assert_eq!(flow.state().candidates().unwrap().selected.as_deref(), Some("m2"));
}
