use clap::Parser;
use url::Url;

use crate::error::{ClientError, Result};

/// Command line / environment configuration shared by the GUI and the
/// terminal client.
#[derive(Parser, Debug, Clone)]
#[command(name = "neon-draw")]
#[command(about = "Neon Draw - draw and guess with friends")]
pub struct ClientConfig {
    /// WebSocket endpoint of the game server
    #[arg(long, env = "NEON_DRAW_SERVER", default_value = "ws://127.0.0.1:5000/ws")]
    pub server: String,

    /// Base URL used when sharing room links (defaults to the server's http origin)
    #[arg(long = "share-url", env = "NEON_DRAW_SHARE_URL")]
    pub share_url: Option<String>,

    /// How many times to retry a dropped connection
    #[arg(long, default_value = "5")]
    pub reconnect_attempts: u32,

    /// Delay between reconnection attempts in milliseconds
    #[arg(long, default_value = "1000")]
    pub reconnect_delay_ms: u64,

    /// Prefill the username fields in the lobby
    #[arg(long)]
    pub username: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: "ws://127.0.0.1:5000/ws".into(),
            share_url: None,
            reconnect_attempts: 5,
            reconnect_delay_ms: 1000,
            username: None,
        }
    }
}

impl ClientConfig {
    /// Origin used for `/room/<code>` links. An explicit `--share-url` wins,
    /// otherwise `ws(s)://host:port/...` becomes `http(s)://host:port`.
    pub fn share_base(&self) -> Result<String> {
        if let Some(base) = &self.share_url {
            return Ok(base.trim_end_matches('/').to_string());
        }
        let url = Url::parse(&self.server).map_err(|_| ClientError::InvalidUrl(self.server.clone()))?;
        let scheme = match url.scheme() {
            "wss" | "https" => "https",
            _ => "http",
        };
        let host = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidUrl(self.server.clone()))?;
        Ok(match url.port() {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        })
    }

    pub fn reconnect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reconnect_delay_ms)
    }
}
