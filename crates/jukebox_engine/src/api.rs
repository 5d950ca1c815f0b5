use jukebox_core::{encrypted_variant, endpoint_url};
use serde_json::Value;

use crate::{HttpMethod, HttpRequest, ResilientTransport, TransportError};

pub const AUTH_STATUS_ENDPOINT: &str = "/api/auth-status";
pub const LOGIN_ENDPOINT: &str = "/api/login";
pub const ADD_ENDPOINT: &str = "/api/add";

/// A JSON API call relative to the server base address.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub endpoint: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl ApiCall {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: HttpMethod::Get,
            body: None,
        }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: HttpMethod::Post,
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    /// 2xx.
    pub ok: bool,
    pub status: u16,
    /// Parsed JSON, or the raw text as a JSON string when it is not JSON.
    pub data: Value,
    /// Base address that answered; differs from the request after an upgrade.
    pub server_address: String,
}

/// Issues API calls against a queue server.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn call(&self, server_address: &str, call: &ApiCall) -> Result<ApiReply, TransportError>;
}

/// Talks to the server directly; only usable from the privileged context.
#[derive(Clone)]
pub struct DirectApi {
    transport: ResilientTransport,
}

impl DirectApi {
    pub fn new(transport: ResilientTransport) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl ApiClient for DirectApi {
    async fn call(&self, server_address: &str, call: &ApiCall) -> Result<ApiReply, TransportError> {
        let url = endpoint_url(server_address, &call.endpoint);
        let request = HttpRequest {
            method: call.method,
            headers: Vec::new(),
            body: call.body.as_ref().map(Value::to_string),
        }
        .header("Content-Type", "application/json");

        let outcome = self.transport.attempt(&url, &request).await?;
        let server_address = if outcome.upgraded(&url) {
            upgraded_base(server_address, &outcome.final_url, &call.endpoint)
        } else {
            server_address.to_string()
        };

        Ok(ApiReply {
            ok: outcome.response.ok(),
            status: outcome.response.status,
            data: parse_body(&outcome.response.body),
            server_address,
        })
    }
}

pub(crate) fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn upgraded_base(server_address: &str, final_url: &str, endpoint: &str) -> String {
    match final_url.strip_suffix(endpoint) {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => encrypted_variant(server_address).unwrap_or_else(|| server_address.to_string()),
    }
}
