//! `llm-relay` binary entrypoint.
//!
//! This starts the Actix server using configuration from flags, the
//! environment and an optional `.env` file.

use clap::Parser;
use llm_relay::{banner, cli::Cli, serve, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();

    // Respect `RUST_LOG` if set; otherwise default to relay-friendly info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let show_banner = !cli.no_banner;
    let config = RelayConfig::from_cli(cli)?;

    if show_banner {
        banner::print_banner(config.port).await;
    }

    serve(config).await
}
