//! Actix Web HTTP server.
//!
//! Exposes OpenAI-compatible endpoints:
//! - `POST /v1/chat/completions` (raw pass-through, any JSON accepted)
//! - `POST /v1/completions` (validated against `CompletionPayload`)
//! - `GET /health`

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    error::JsonPayloadError, http::header::ContentType, web, App, HttpResponse, HttpServer,
};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    config::RelayConfig,
    error::RelayError,
    forward::{Forwarder, CHAT_COMPLETIONS, COMPLETIONS},
    types::{ChatCompletionPayload, CompletionPayload, HealthStatus},
};

/// Tracing target for request body dumps (only emitted with `--debug`).
pub const PAYLOAD_TARGET: &str = "llm_relay::payload";

/// Chat requests may carry inline images; the actix default of 256kB is too small.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub struct AppState {
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(client: reqwest::Client, config: Arc<RelayConfig>) -> Self {
        Self {
            forwarder: Forwarder::new(client, config),
        }
    }

    fn config(&self) -> &RelayConfig {
        self.forwarder.config()
    }
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let addr = config.bind_addr();
    info!(addr = %addr, upstream = %config.base_url, "llm-relay listening");

    let client = reqwest::Client::builder()
        .build()
        .context("failed to build reqwest client")?;

    let state = web::Data::new(AppState::new(client, Arc::new(config)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors())
            .configure(configure)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}

/// Any origin, method and header. Preflights echo the requesting origin.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Register routes and extractor limits. Shared by `serve` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/health", web::get().to(health_check))
        .route("/v1/chat/completions", web::post().to(chat_completions))
        .route("/v1/completions", web::post().to(completions));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .content_type_required(false)
        .error_handler(|err, _req| {
            let detail = match &err {
                JsonPayloadError::Deserialize(e) => e.to_string(),
                other => other.to_string(),
            };
            warn!(error = %detail, "rejected completions payload");
            RelayError::Validation(detail).into()
        })
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus::healthy())
}

async fn chat_completions(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
    let debug_payloads = state.config().debug;

    if debug_payloads {
        info!(
            target: PAYLOAD_TARGET,
            body = %String::from_utf8_lossy(&body),
            "raw request body"
        );
    }

    let parsed: Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "error processing request");
        RelayError::InvalidBody(e.to_string())
    })?;

    if debug_payloads {
        let pretty = serde_json::to_string_pretty(&parsed).unwrap_or_default();
        info!(target: PAYLOAD_TARGET, parsed = %pretty, "parsed request data");
    }

    match ChatCompletionPayload::inspect(&parsed) {
        Some(view) => {
            debug!(
                model = ?view.model,
                messages = view.messages.len(),
                streaming = view.is_streaming(),
                "chat completion request"
            );
            if view.is_streaming() {
                warn!("stream=true requested; the upstream reply is relayed buffered");
            }
        }
        None => debug!("chat body not in chat completion shape, forwarding as-is"),
    }

    let out = state.forwarder.forward_raw(CHAT_COMPLETIONS, body).await?;
    Ok(relay_response(out))
}

async fn completions(
    state: web::Data<AppState>,
    payload: web::Json<CompletionPayload>,
) -> Result<HttpResponse, RelayError> {
    let payload = payload
        .into_inner()
        .with_default_model(&state.config().default_model);

    debug!(
        model = ?payload.model,
        max_tokens = ?payload.max_tokens,
        "completion request"
    );

    let out = state.forwarder.forward_json(COMPLETIONS, &payload).await?;
    Ok(relay_response(out))
}

/// Upstream JSON, byte for byte.
fn relay_response(body: web::Bytes) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}
