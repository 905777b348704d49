use serde::{Deserialize, Serialize};

use crate::model::connector::ConnectorType;

/// Connection state reported for a connector. The backend is inconsistent
/// about casing, so both `connected` and `CONNECTED` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[serde(alias = "CONNECTED")]
    Connected,
    #[serde(alias = "DISCONNECTED")]
    Disconnected,
    #[serde(alias = "ERROR")]
    Error,
}

impl ConnectionState {
    pub fn css_class(self) -> &'static str {
        match self {
            ConnectionState::Connected => "status-connected",
            ConnectionState::Disconnected => "status-disconnected",
            ConnectionState::Error => "status-error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Error => "Error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ConnectionState::Connected => "check_circle",
            ConnectionState::Disconnected => "pending",
            ConnectionState::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorStatus {
    pub id: String,
    #[serde(rename = "type")]
    pub connector_type: ConnectorType,
    #[serde(default)]
    pub name: String,
    pub status: ConnectionState,
    pub last_checked: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub connector_id: String,
    pub timestamp: String,
    pub message_count: u64,
    pub error_count: u64,
    /// Milliseconds.
    pub average_processing_time: f64,
    pub active_connections: u32,
}

/// A full monitoring snapshot; also the payload of every push-channel frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringData {
    #[serde(default)]
    pub connector_statuses: Vec<ConnectorStatus>,
    #[serde(default)]
    pub performance_metrics: Vec<PerformanceMetrics>,
}

impl MonitoringData {
    pub fn metrics_for(&self, connector_id: &str) -> Option<&PerformanceMetrics> {
        self.performance_metrics
            .iter()
            .filter(|m| m.connector_id == connector_id)
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp))
    }

    pub fn total_messages(&self) -> u64 {
        self.performance_metrics.iter().map(|m| m.message_count).sum()
    }

    pub fn total_errors(&self) -> u64 {
        self.performance_metrics.iter().map(|m| m.error_count).sum()
    }
}

/// Alert thresholds edited from the monitoring dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConfig {
    pub enabled: bool,
    pub error_threshold: u32,
    /// Milliseconds.
    pub processing_time_threshold: u32,
    #[serde(default)]
    pub notification_email: String,
    #[serde(default)]
    pub notification_webhook: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            error_threshold: 10,
            processing_time_threshold: 1000,
            notification_email: String::new(),
            notification_webhook: String::new(),
        }
    }
}
