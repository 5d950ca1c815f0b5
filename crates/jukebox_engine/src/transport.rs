use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::{FailureKind, HttpRequest, HttpResponse, TransportError};

#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// `None` leaves the client default in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            user_agent: concat!("lan-jukebox/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Performs a single HTTP exchange. No retries.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport with a cookie jar, so a login session set by
/// one call is forwarded on the next.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let mut builder = self.client.request(method, parsed);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::new(FailureKind::Body, err.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    let message = describe(&err);
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, message);
    }
    if err.is_builder() {
        return TransportError::new(FailureKind::InvalidUrl, message);
    }
    if err.is_connect() {
        return TransportError::new(FailureKind::Connect, message);
    }
    TransportError::new(FailureKind::Network, message)
}

/// reqwest's top-level message hides the cause (refused, DNS, TLS).
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
