mod common;

use std::sync::Arc;

use common::ScriptedTransport;
use jukebox_engine::{FailureKind, HttpMethod, HttpRequest, ResilientTransport};
use jukebox_logging::MemoryDiagnostics;
use serde_json::json;

fn resilient(transport: &Arc<ScriptedTransport>, diagnostics: &Arc<MemoryDiagnostics>) -> ResilientTransport {
    ResilientTransport::new(transport.clone(), diagnostics.clone())
}

#[tokio::test]
async fn plain_failure_falls_back_to_encrypted() {
    let transport = Arc::new(
        ScriptedTransport::new().respond("https://box/api/auth-status", 200, json!({})),
    );
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let request = HttpRequest::post(r#"{"a":1}"#).header("Content-Type", "application/json");

    let outcome = resilient(&transport, &diagnostics)
        .attempt("http://box/api/auth-status", &request)
        .await
        .expect("fallback succeeds");

    assert_eq!(outcome.final_url, "https://box/api/auth-status");
    assert!(outcome.upgraded("http://box/api/auth-status"));
    assert_eq!(outcome.response.status, 200);

    // The retry replays the identical request.
    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, calls[1].1);
    assert_eq!(calls[1].1.method, HttpMethod::Post);
    assert_eq!(diagnostics.count("protocol_fallback"), 1);
}

#[tokio::test]
async fn encrypted_failure_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::new().fail(
        "https://box/api/add",
        FailureKind::Connect,
        "tls handshake failed",
    ));
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let err = resilient(&transport, &diagnostics)
        .attempt("https://box/api/add", &HttpRequest::get())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Connect);
    assert_eq!(err.message, "tls handshake failed");
    assert_eq!(transport.urls(), vec!["https://box/api/add".to_string()]);
    assert!(diagnostics.records().is_empty());
}

#[tokio::test]
async fn both_failures_surface_the_first_error() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .fail("http://box/x", FailureKind::Connect, "connection refused")
            .fail("https://box/x", FailureKind::Timeout, "handshake timed out"),
    );
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let err = resilient(&transport, &diagnostics)
        .attempt("http://box/x", &HttpRequest::get())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Connect);
    assert_eq!(err.message, "connection refused");
    assert_eq!(transport.urls().len(), 2);
    assert_eq!(
        diagnostics.events(),
        vec!["protocol_fallback", "protocol_fallback_failed"]
    );
}

#[tokio::test]
async fn http_error_status_is_not_a_transport_failure() {
    let transport = Arc::new(
        ScriptedTransport::new().respond_text("http://box/api/add", 500, "boom"),
    );
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let outcome = resilient(&transport, &diagnostics)
        .attempt("http://box/api/add", &HttpRequest::get())
        .await
        .expect("completed exchange");

    assert!(!outcome.response.ok());
    assert_eq!(outcome.final_url, "http://box/api/add");
    assert_eq!(transport.urls().len(), 1);
}

#[tokio::test]
async fn invalid_url_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::new().fail(
        "http://bad host/x",
        FailureKind::InvalidUrl,
        "invalid domain character",
    ));
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let err = resilient(&transport, &diagnostics)
        .attempt("http://bad host/x", &HttpRequest::get())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert_eq!(transport.urls().len(), 1);
}
