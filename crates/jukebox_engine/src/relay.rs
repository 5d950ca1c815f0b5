//! Relay endpoint: runs API calls for callers that cannot reach the network.
//!
//! The relay owns a dedicated thread with a single-threaded tokio runtime.
//! Every request is answered exactly once, including when the handler
//! panics, so a waiting caller never hangs.

use std::io;
use std::sync::Arc;
use std::thread;

use jukebox_logging::Diagnostics;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::{ApiCall, ApiClient, ApiReply, DirectApi, FailureKind, HttpMethod, TransportError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum RelayRequest {
    #[serde(rename = "apiCall", rename_all = "camelCase")]
    ApiCall {
        endpoint: String,
        #[serde(default)]
        method: HttpMethod,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
        server_address: String,
    },
}

impl RelayRequest {
    pub fn api_call(server_address: &str, call: &ApiCall) -> Self {
        RelayRequest::ApiCall {
            endpoint: call.endpoint.clone(),
            method: call.method,
            body: call.body.clone(),
            server_address: server_address.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_server_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn success(reply: ApiReply) -> Self {
        Self {
            success: true,
            ok: Some(reply.ok),
            status: Some(reply.status),
            data: Some(reply.data),
            updated_server_address: Some(reply.server_address),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.is_empty() {
            error = "relay request failed".to_string();
        }
        Self {
            success: false,
            ok: None,
            status: None,
            data: None,
            updated_server_address: None,
            error: Some(error),
        }
    }

    /// Converts back into the caller-side reply; `server_address` is the
    /// address the request was made against.
    pub fn into_reply(self, server_address: &str) -> Result<ApiReply, TransportError> {
        if !self.success {
            let message = self
                .error
                .unwrap_or_else(|| "relay request failed".to_string());
            return Err(TransportError::new(FailureKind::Network, message));
        }
        let status = self.status.unwrap_or_default();
        Ok(ApiReply {
            ok: self.ok.unwrap_or((200..300).contains(&status)),
            status,
            data: self.data.unwrap_or(Value::Null),
            server_address: self
                .updated_server_address
                .unwrap_or_else(|| server_address.to_string()),
        })
    }
}

struct Envelope {
    request: RelayRequest,
    reply: oneshot::Sender<RelayResponse>,
}

/// Cheap to clone; the relay stops when the last handle is dropped.
#[derive(Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl RelayHandle {
    pub fn spawn(api: DirectApi, diagnostics: Arc<dyn Diagnostics>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
        let api = Arc::new(api);

        thread::Builder::new()
            .name("jukebox-relay".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(envelope) = rx.recv().await {
                        let api = api.clone();
                        let diagnostics = diagnostics.clone();
                        tokio::spawn(serve(api, diagnostics, envelope));
                    }
                });
            })?;

        Ok(Self { tx })
    }

    /// Sends one request and waits for its single response.
    pub async fn request(&self, request: RelayRequest) -> Result<RelayResponse, TransportError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .map_err(|_| unavailable("relay endpoint is not running"))?;
        response
            .await
            .map_err(|_| unavailable("relay endpoint dropped the request"))
    }
}

fn unavailable(message: &str) -> TransportError {
    TransportError::new(FailureKind::RelayUnavailable, message)
}

async fn serve(api: Arc<DirectApi>, diagnostics: Arc<dyn Diagnostics>, envelope: Envelope) {
    let Envelope { request, reply } = envelope;
    let response = match tokio::spawn(handle_request(api, request)).await {
        Ok(response) => response,
        Err(join_err) => RelayResponse::failure(describe_join_error(join_err)),
    };
    if let Some(error) = response.error.as_deref() {
        diagnostics.error("relay_call_failed", error.to_string());
    }
    // The caller may have gone away; nothing left to do then.
    let _ = reply.send(response);
}

async fn handle_request(api: Arc<DirectApi>, request: RelayRequest) -> RelayResponse {
    match request {
        RelayRequest::ApiCall {
            endpoint,
            method,
            body,
            server_address,
        } => {
            let call = ApiCall {
                endpoint,
                method,
                body,
            };
            match api.call(&server_address, &call).await {
                Ok(reply) => RelayResponse::success(reply),
                Err(err) => RelayResponse::failure(err.message),
            }
        }
    }
}

fn describe_join_error(err: tokio::task::JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => {
            if let Some(message) = payload.downcast_ref::<&str>() {
                format!("relay handler panicked: {message}")
            } else if let Some(message) = payload.downcast_ref::<String>() {
                format!("relay handler panicked: {message}")
            } else {
                "relay handler panicked".to_string()
            }
        }
        Err(_) => "relay handler was cancelled".to_string(),
    }
}

/// [`ApiClient`] for the restricted context: forwards every call to the relay.
#[derive(Clone)]
pub struct RelayApi {
    relay: RelayHandle,
}

impl RelayApi {
    pub fn new(relay: RelayHandle) -> Self {
        Self { relay }
    }
}

#[async_trait::async_trait]
impl ApiClient for RelayApi {
    async fn call(&self, server_address: &str, call: &ApiCall) -> Result<ApiReply, TransportError> {
        let response = self
            .relay
            .request(RelayRequest::api_call(server_address, call))
            .await?;
        response.into_reply(server_address)
    }
}
