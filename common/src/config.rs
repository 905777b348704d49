use serde::{Deserialize, Serialize};

use crate::backoff::ReconnectPolicy;
use crate::endpoints;

/// Path at which the console server publishes [`ConsoleConfig`].
pub const CONSOLE_CONFIG_PATH: &str = "/console/config";

/// Runtime configuration the SPA fetches from the console server at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// General middleware API (auth, clients, interfaces, mapping, monitoring).
    pub api_base_url: String,
    /// Listener configuration API (SFTP, AS2, API connectors).
    pub listener_api_base_url: String,
    /// Push channel for monitoring frames. Derived from `api_base_url`
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring_channel_url: Option<String>,
    #[serde(default)]
    pub reconnect: ReconnectPolicy,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            listener_api_base_url: "http://localhost:8081".to_string(),
            monitoring_channel_url: None,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn monitoring_channel(&self) -> String {
        self.monitoring_channel_url.clone().unwrap_or_else(|| {
            endpoints::websocket_url(&self.api_base_url, endpoints::MONITORING_CHANNEL)
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        endpoints::join(&self.api_base_url, path)
    }

    pub fn listener_url(&self, path: &str) -> String {
        endpoints::join(&self.listener_api_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_url_defaults_to_api_host() {
        let config = ConsoleConfig::default();
        assert_eq!(
            config.monitoring_channel(),
            "ws://localhost:8080/ws/monitoring"
        );
    }

    #[test]
    fn reconnect_policy_is_optional_in_json() {
        let config: ConsoleConfig = serde_json::from_str(
            r#"{"apiBaseUrl":"https://api","listenerApiBaseUrl":"https://listener"}"#,
        )
        .unwrap();
        assert_eq!(config.reconnect, ReconnectPolicy::default());
        assert_eq!(config.listener_url("/api/sftp/config"), "https://listener/api/sftp/config");
    }
}
