//! Startup banner with the addresses the relay is reachable on.
//!
//! Purely informational: lookups are best-effort and never block startup
//! for longer than `PUBLIC_IP_TIMEOUT`.

use std::net::{IpAddr, UdpSocket};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

const PUBLIC_IP_URL: &str = "https://api.ipify.org?format=json";
const PUBLIC_IP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// Address of the interface used for outbound traffic.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

pub async fn public_ip(client: &reqwest::Client) -> Option<String> {
    let result: Result<IpifyResponse, reqwest::Error> = async {
        client
            .get(PUBLIC_IP_URL)
            .timeout(PUBLIC_IP_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<IpifyResponse>()
            .await
    }
    .await;

    match result {
        Ok(body) => Some(body.ip),
        Err(e) => {
            debug!(error = %e, "public IP lookup failed");
            None
        }
    }
}

pub fn render(port: u16, local: Option<IpAddr>, public: Option<&str>) -> String {
    let rule = "=".repeat(50);
    let local = local
        .map(|ip| format!("http://{}:{}", ip, port))
        .unwrap_or_else(|| "Could not determine local IP".to_string());
    let public = public
        .map(|ip| format!("http://{}:{}", ip, port))
        .unwrap_or_else(|| "Could not determine public IP".to_string());

    format!(
        "\n{rule}\nLLM Relay Server Starting...\n{rule}\nLocal IP:  {local}\nPublic IP: {public}\n{rule}\n"
    )
}

pub async fn print_banner(port: u16) {
    let client = reqwest::Client::new();
    let public = public_ip(&client).await;
    println!("{}", render(port, local_ip(), public.as_deref()));
}
