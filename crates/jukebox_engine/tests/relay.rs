mod common;

use std::sync::Arc;

use common::{direct_api, Harness, ScriptedTransport};
use jukebox_core::{ServerProfile, SubmissionItem};
use jukebox_engine::{
    ApiCall, ApiClient, FailureKind, RelayApi, RelayHandle, RelayRequest, SessionOrchestrator,
};
use jukebox_logging::MemoryDiagnostics;
use serde_json::json;

fn spawn_relay(transport: ScriptedTransport) -> (RelayHandle, Arc<ScriptedTransport>, Arc<MemoryDiagnostics>) {
    let transport = Arc::new(transport);
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let relay = RelayHandle::spawn(
        direct_api(transport.clone(), diagnostics.clone()),
        diagnostics.clone(),
    )
    .expect("relay thread");
    (relay, transport, diagnostics)
}

#[tokio::test]
async fn relay_answers_with_parsed_json_and_status() {
    let (relay, transport, _) = spawn_relay(
        ScriptedTransport::new().respond("http://box/api/auth-status", 200, json!({"requireLogin": false})),
    );

    let response = relay
        .request(RelayRequest::api_call("http://box", &ApiCall::get("/api/auth-status")))
        .await
        .expect("answered");

    assert!(response.success);
    assert_eq!(response.ok, Some(true));
    assert_eq!(response.status, Some(200));
    assert_eq!(response.data, Some(json!({"requireLogin": false})));
    assert_eq!(response.updated_server_address.as_deref(), Some("http://box"));

    let (_, request) = &transport.calls()[0];
    assert!(request
        .headers
        .iter()
        .any(|(name, value)| name == "Content-Type" && value == "application/json"));
}

#[tokio::test]
async fn relay_returns_raw_text_when_body_is_not_json() {
    let (relay, _, _) = spawn_relay(
        ScriptedTransport::new().respond_text("http://box/api/add", 503, "Service Unavailable"),
    );

    let response = relay
        .request(RelayRequest::api_call("http://box", &ApiCall::post("/api/add", json!({}))))
        .await
        .expect("answered");

    assert!(response.success);
    assert_eq!(response.ok, Some(false));
    assert_eq!(response.status, Some(503));
    assert_eq!(response.data, Some(json!("Service Unavailable")));
}

#[tokio::test]
async fn relay_reports_upgraded_server_address() {
    let (relay, _, _) = spawn_relay(
        ScriptedTransport::new().respond("https://box:8443/api/auth-status", 200, json!({})),
    );

    let response = relay
        .request(RelayRequest::api_call(
            "http://box:8443",
            &ApiCall::get("/api/auth-status"),
        ))
        .await
        .expect("answered");

    assert_eq!(
        response.updated_server_address.as_deref(),
        Some("https://box:8443")
    );
}

#[tokio::test]
async fn transport_failure_becomes_failure_response() {
    let (relay, _, diagnostics) = spawn_relay(ScriptedTransport::new().fail(
        "https://box/api/add",
        FailureKind::Connect,
        "connection refused",
    ));

    let response = relay
        .request(RelayRequest::api_call("https://box", &ApiCall::post("/api/add", json!({}))))
        .await
        .expect("answered");

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("connection refused"));
    assert_eq!(diagnostics.count("relay_call_failed"), 1);
}

#[tokio::test]
async fn panicking_handler_still_gets_exactly_one_failure_response() {
    let (relay, _, _) = spawn_relay(
        ScriptedTransport::new().panic_on("http://box/api/auth-status", "handler exploded"),
    );

    let response = relay
        .request(RelayRequest::api_call("http://box", &ApiCall::get("/api/auth-status")))
        .await
        .expect("answered despite panic");

    assert!(!response.success);
    let error = response.error.expect("error message");
    assert!(!error.is_empty());
    assert!(error.contains("handler exploded"), "{error}");

    // The relay keeps serving after a panic.
    let response = relay
        .request(RelayRequest::api_call("http://other", &ApiCall::get("/api/auth-status")))
        .await
        .expect("answered");
    assert!(!response.success);
}

#[tokio::test]
async fn concurrent_requests_are_answered_independently() {
    let (relay, _, _) = spawn_relay(
        ScriptedTransport::new()
            .respond("http://a/api/auth-status", 200, json!({"server": "a"}))
            .respond("http://b/api/auth-status", 200, json!({"server": "b"})),
    );
    let api = RelayApi::new(relay);

    let call = ApiCall::get("/api/auth-status");
    let (a, b) = tokio::join!(api.call("http://a", &call), api.call("http://b", &call));

    assert_eq!(a.expect("a").data, json!({"server": "a"}));
    assert_eq!(b.expect("b").data, json!({"server": "b"}));
}

#[tokio::test]
async fn orchestrator_runs_through_the_relay() {
    let (relay, transport, diagnostics) = spawn_relay(
        ScriptedTransport::new()
            .respond("https://box/api/auth-status", 200, json!({"requireLogin": false}))
            .respond("https://box/api/add", 200, json!({"success": true, "video": {"title": "Song"}})),
    );
    let harness = Harness::new(ScriptedTransport::new(), ServerProfile::new("http://box"));
    let orchestrator = SessionOrchestrator::new(
        Arc::new(RelayApi::new(relay)),
        harness.store.clone(),
        diagnostics,
    );
    let item = SubmissionItem {
        source_url: "https://youtu.be/abc".to_string(),
        display_title: "Song - YouTube".to_string(),
    };

    let receipt = orchestrator
        .submit(&item, ServerProfile::new("http://box"))
        .await
        .expect("added");

    assert_eq!(receipt.title, "Song");
    assert_eq!(receipt.profile.address, "https://box");
    assert_eq!(harness.store.address_updates(), vec!["https://box".to_string()]);
    assert_eq!(transport.count("http://box/api/add"), 0);
}
