#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use jukebox_engine::{
    DirectApi, FailureKind, HttpRequest, HttpResponse, MemoryProfileStore, ResilientTransport,
    SessionOrchestrator, Transport, TransportError,
};
use jukebox_logging::MemoryDiagnostics;
use jukebox_core::ServerProfile;

#[derive(Debug, Clone)]
pub enum Scripted {
    Respond(u16, String),
    Fail(FailureKind, &'static str),
    Panic(&'static str),
}

/// Answers from a fixed URL table; unknown URLs fail to connect.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(String, HttpRequest)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, status: u16, body: serde_json::Value) -> Self {
        self.route(url, Scripted::Respond(status, body.to_string()))
    }

    pub fn respond_text(self, url: &str, status: u16, body: &str) -> Self {
        self.route(url, Scripted::Respond(status, body.to_string()))
    }

    pub fn fail(self, url: &str, kind: FailureKind, message: &'static str) -> Self {
        self.route(url, Scripted::Fail(kind, message))
    }

    pub fn panic_on(self, url: &str, message: &'static str) -> Self {
        self.route(url, Scripted::Panic(message))
    }

    fn route(self, url: &str, scripted: Scripted) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), scripted);
        self
    }

    pub fn calls(&self) -> Vec<(String, HttpRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }

    pub fn count(&self, url: &str) -> usize {
        self.urls().iter().filter(|called| called.as_str() == url).count()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));
        let scripted = self.routes.lock().unwrap().get(url).cloned();
        match scripted {
            Some(Scripted::Respond(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Scripted::Fail(kind, message)) => Err(TransportError::new(kind, message)),
            Some(Scripted::Panic(message)) => panic!("{}", message),
            None => Err(TransportError::new(
                FailureKind::Connect,
                format!("connection refused: {url}"),
            )),
        }
    }
}

pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<MemoryProfileStore>,
    pub diagnostics: Arc<MemoryDiagnostics>,
    pub orchestrator: SessionOrchestrator,
}

impl Harness {
    pub fn new(transport: ScriptedTransport, profile: ServerProfile) -> Self {
        let transport = Arc::new(transport);
        let store = Arc::new(MemoryProfileStore::new(profile));
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let orchestrator = SessionOrchestrator::new(
            Arc::new(direct_api(transport.clone(), diagnostics.clone())),
            store.clone(),
            diagnostics.clone(),
        );
        Self {
            transport,
            store,
            diagnostics,
            orchestrator,
        }
    }
}

pub fn direct_api(transport: Arc<ScriptedTransport>, diagnostics: Arc<MemoryDiagnostics>) -> DirectApi {
    DirectApi::new(ResilientTransport::new(transport, diagnostics))
}
