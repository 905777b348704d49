//! Command line and environment configuration of the console server.

use clap::Parser;
use common::backoff::ReconnectPolicy;
use common::config::ConsoleConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "backend", version, about = "Serves the middleware console")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "CONSOLE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "CONSOLE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the general middleware API.
    #[arg(long, env = "CONSOLE_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Base URL of the listener configuration API.
    #[arg(
        long,
        env = "CONSOLE_LISTENER_API_URL",
        default_value = "http://localhost:8081"
    )]
    pub listener_api_url: String,

    /// Overrides the monitoring push channel URL derived from `--api-url`.
    #[arg(long, env = "CONSOLE_MONITORING_URL")]
    pub monitoring_url: Option<String>,

    #[arg(long, env = "CONSOLE_RECONNECT_INITIAL_MS", default_value_t = 1000)]
    pub reconnect_initial_ms: u32,

    #[arg(long, env = "CONSOLE_RECONNECT_MAX_MS", default_value_t = 30000)]
    pub reconnect_max_ms: u32,

    #[arg(long, env = "CONSOLE_RECONNECT_MAX_ATTEMPTS", default_value_t = 8)]
    pub reconnect_max_attempts: u32,

    /// Opens the console in the default browser once the server is up.
    #[arg(long, env = "CONSOLE_OPEN_BROWSER")]
    pub open_browser: bool,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// The part of the configuration the browser needs.
    pub fn console(&self) -> ConsoleConfig {
        ConsoleConfig {
            api_base_url: self.api_url.trim_end_matches('/').to_string(),
            listener_api_base_url: self.listener_api_url.trim_end_matches('/').to_string(),
            monitoring_channel_url: self.monitoring_url.clone(),
            reconnect: ReconnectPolicy {
                initial_delay_ms: self.reconnect_initial_ms,
                max_delay_ms: self.reconnect_max_ms.max(self.reconnect_initial_ms),
                max_attempts: self.reconnect_max_attempts,
                ..ReconnectPolicy::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_backend() {
        let config = ServerConfig::parse_from(["backend"]);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        let console = config.console();
        assert_eq!(console.listener_api_base_url, "http://localhost:8081");
        assert_eq!(console.reconnect.max_attempts, 8);
    }

    #[test]
    fn flags_override_urls_and_policy() {
        let config = ServerConfig::parse_from([
            "backend",
            "--api-url",
            "https://mw.example.com/",
            "--reconnect-initial-ms",
            "5000",
            "--reconnect-max-ms",
            "2000",
        ]);
        let console = config.console();
        assert_eq!(console.api_base_url, "https://mw.example.com");
        assert_eq!(console.reconnect.max_delay_ms, 5000);
        assert_eq!(console.monitoring_channel(), "wss://mw.example.com/ws/monitoring");
    }
}
