use std::sync::Arc;

use jukebox_core::encrypted_variant;
use jukebox_logging::Diagnostics;

use crate::{HttpRequest, HttpResponse, Transport, TransportError};

/// Result of [`ResilientTransport::attempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOutcome {
    pub response: HttpResponse,
    /// The URL that actually answered.
    pub final_url: String,
}

impl TransportOutcome {
    pub fn upgraded(&self, requested_url: &str) -> bool {
        self.final_url != requested_url
    }
}

/// Wraps a [`Transport`] with a one-shot `http://` to `https://` fallback.
///
/// Only failures that produced no HTTP status trigger the retry. When the
/// retry fails too, the first error is returned.
#[derive(Clone)]
pub struct ResilientTransport {
    inner: Arc<dyn Transport>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ResilientTransport {
    pub fn new(inner: Arc<dyn Transport>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { inner, diagnostics }
    }

    pub async fn attempt(
        &self,
        url: &str,
        request: &HttpRequest,
    ) -> Result<TransportOutcome, TransportError> {
        let original = match self.inner.send(url, request).await {
            Ok(response) => {
                return Ok(TransportOutcome {
                    response,
                    final_url: url.to_string(),
                })
            }
            Err(err) => err,
        };

        if !original.is_pre_status() {
            return Err(original);
        }
        let Some(encrypted) = encrypted_variant(url) else {
            return Err(original);
        };

        self.diagnostics.info(
            "protocol_fallback",
            format!("{url} failed ({original}), trying {encrypted}"),
        );
        match self.inner.send(&encrypted, request).await {
            Ok(response) => Ok(TransportOutcome {
                response,
                final_url: encrypted,
            }),
            Err(retry_err) => {
                self.diagnostics.error(
                    "protocol_fallback_failed",
                    format!("{encrypted} failed too ({retry_err})"),
                );
                Err(original)
            }
        }
    }
}
