//! Upstream forwarding.
//!
//! One POST per call, no retries, no timeout beyond the client's default.
//! Successful replies are buffered, checked to be JSON and handed back as the
//! upstream's bytes. `stream: true` bodies are relayed as-is but the upstream
//! reply is still read in full.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::{de::IgnoredAny, Serialize};
use tracing::{debug, error, warn};

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};

pub const CHAT_COMPLETIONS: &str = "chat/completions";
pub const COMPLETIONS: &str = "completions";

pub struct Forwarder {
    client: Client,
    config: Arc<RelayConfig>,
}

impl Forwarder {
    pub fn new(client: Client, config: Arc<RelayConfig>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Serialize `payload` as the request body.
    pub async fn forward_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<Bytes> {
        let request = self.request(endpoint).json(payload);
        self.send(endpoint, request).await
    }

    /// Send the client's bytes unchanged.
    pub async fn forward_raw(&self, endpoint: &str, body: Bytes) -> Result<Bytes> {
        let request = self
            .request(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(endpoint, request).await
    }

    fn request(&self, endpoint: &str) -> RequestBuilder {
        self.client
            .post(self.config.endpoint_url(endpoint))
            .bearer_auth(self.config.api_key())
            .header("HTTP-Referer", self.config.referer.as_str())
            .header("X-Title", self.config.title.as_str())
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Bytes> {
        let started = Instant::now();

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, endpoint, "upstream request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = match response.error_for_status_ref() {
                Err(e) => e.to_string(),
                Ok(_) => format!("unexpected upstream status ({status})"),
            };
            let text = response.text().await.unwrap_or_default();
            warn!(%status, endpoint, elapsed_ms, body = %text, "upstream error");
            return Err(RelayError::upstream(Some(status.as_u16()), message));
        }

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, endpoint, "failed to read upstream response");
            RelayError::from(e)
        })?;

        debug!(%status, endpoint, elapsed_ms, bytes = body.len(), "upstream response");

        // Syntax check only; the reply goes back exactly as received.
        serde_json::from_slice::<IgnoredAny>(&body).map_err(|e| {
            error!(error = %e, endpoint, "failed to decode upstream response");
            RelayError::BadUpstreamResponse(e.to_string())
        })?;

        Ok(body)
    }
}
