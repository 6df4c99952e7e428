//! Relay configuration.
//!
//! Built once at startup (from [`Cli`], which itself reads the environment) and
//! shared read-only by every request afterwards.
//!
//! **Environment variables:**
//! - `OPENROUTER_API_KEY`: upstream API key (required)
//! - `LLM_RELAY_BASE_URL`: upstream base URL (default: https://openrouter.ai/api/v1)
//! - `DEFAULT_MODEL`: model for completions requests without one (default: openai/gpt-3.5-turbo)
//! - `LLM_RELAY_HOST` / `PORT`: bind address (default: 0.0.0.0:8000)
//! - `LLM_RELAY_DEBUG`: log chat request bodies

use secrecy::{ExposeSecret, SecretString};

use crate::cli::Cli;
use crate::error::{RelayError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REFERER: &str = "https://github.com/junhoyeo/llm-relay";
pub const DEFAULT_TITLE: &str = "LLM Relay Server";

#[derive(Debug)]
pub struct RelayConfig {
    api_key: SecretString,
    pub base_url: String,
    pub default_model: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    /// Sent upstream as `HTTP-Referer`.
    pub referer: String,
    /// Sent upstream as `X-Title`.
    pub title: String,
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RelayError::Configuration(
                "OPENROUTER_API_KEY is not set".to_string(),
            ));
        }

        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(RelayError::Configuration(
                "upstream base URL is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            default_model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        })
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let api_key = cli.api_key.unwrap_or_default();
        Ok(Self::new(api_key, cli.base_url)?
            .with_default_model(cli.default_model)
            .with_bind(cli.host, cli.port)
            .with_debug(cli.debug))
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// `base_url` and `suffix` joined by exactly one `/`.
    pub fn endpoint_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            suffix.trim_start_matches('/')
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
