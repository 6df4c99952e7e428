//! Command-line flags.
//!
//! Every flag can also be supplied through the environment (or a `.env` file
//! in the working directory, loaded before parsing).

use clap::Parser;

use crate::config::{DEFAULT_BASE_URL, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT};

/// llm-relay - forward completion requests to an upstream LLM API
#[derive(Parser, Debug)]
#[command(name = "llm-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API key sent upstream as a bearer token
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream base URL (e.g., https://openrouter.ai/api/v1)
    #[arg(long, env = "LLM_RELAY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used when a completions request does not name one
    #[arg(long, env = "DEFAULT_MODEL", default_value = DEFAULT_MODEL)]
    pub default_model: String,

    /// Address to bind
    #[arg(long, env = "LLM_RELAY_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log raw and parsed chat request bodies
    #[arg(long, env = "LLM_RELAY_DEBUG")]
    pub debug: bool,

    /// Skip the startup address banner
    #[arg(long)]
    pub no_banner: bool,
}
