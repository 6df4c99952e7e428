//! LLM Relay - forwards OpenAI-style completion requests to an upstream API.
//!
//! The relay injects the configured bearer token and otherwise passes traffic
//! through untouched:
//! - `/v1/chat/completions` bodies are forwarded byte-for-byte.
//! - `/v1/completions` bodies are validated, defaulted and re-serialized.
//! - Upstream JSON is returned verbatim; upstream failures mirror the status.
//!
//! Streaming is not special-cased: `stream: true` is forwarded, but the reply
//! is buffered and parsed as JSON.

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod forward;
pub mod server;
pub mod types;

pub use config::RelayConfig;
pub use error::RelayError;
pub use server::serve;
