//! Paths of the backend endpoints the console calls.
//!
//! Paths are relative; the frontend prefixes them with the general API base
//! URL or, for connector configuration, the listener API base URL.

use crate::model::connector::ConnectorType;
use crate::requests::PageQuery;

pub const LOGIN: &str = "/api/auth/login";
pub const LOGOUT: &str = "/api/auth/logout";
pub const VALIDATE_SESSION: &str = "/api/auth/validate";

pub const CLIENTS: &str = "/api/clients";
pub const INTERFACES: &str = "/api/interfaces";
pub const MAPPING_RULES: &str = "/api/mapping-rules";
pub const USERS: &str = "/api/users";
pub const AUDIT_LOGS: &str = "/api/audit-logs";

pub const MONITORING_STATUS: &str = "/api/monitoring/status";
pub const MONITORING_METRICS: &str = "/api/monitoring/metrics";
pub const MONITORING_CHANNEL: &str = "/ws/monitoring";

pub const AS2_ALGORITHMS: &str = "/api/as2/algorithms";

pub fn clients_page(query: &PageQuery) -> String {
    format!("{}?{}", CLIENTS, query.to_query_string())
}

pub fn client(id: i64) -> String {
    format!("{}/{}", CLIENTS, id)
}

pub fn client_interfaces(client_id: i64) -> String {
    format!("{}/{}/interfaces", CLIENTS, client_id)
}

pub fn interface(id: i64) -> String {
    format!("{}/{}", INTERFACES, id)
}

pub fn xsd_structure(interface_id: i64) -> String {
    format!("/api/mapping/xsd-structure/{}", interface_id)
}

pub fn database_fields(client_id: i64, interface_id: i64) -> String {
    format!(
        "/api/mapping/database-fields?clientId={}&interfaceId={}",
        client_id, interface_id
    )
}

pub fn interface_mappings(client_id: i64, interface_id: i64) -> String {
    format!(
        "{}/{}/mappings?clientId={}",
        INTERFACES, interface_id, client_id
    )
}

pub fn mapping_rule(id: i64) -> String {
    format!("/api/mapping/rules/{}", id)
}

pub fn user(id: i64) -> String {
    format!("{}/{}", USERS, id)
}

pub fn audit_logs_page(query: &PageQuery) -> String {
    format!("{}?{}", AUDIT_LOGS, query.to_query_string())
}

/// Listener API paths for one connector kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerEndpoints {
    kind: ConnectorType,
}

impl ListenerEndpoints {
    pub fn new(kind: ConnectorType) -> Self {
        Self { kind }
    }

    pub fn base(&self) -> String {
        format!("/api/{}/config", self.kind.path_segment())
    }

    pub fn by_id(&self, id: i64) -> String {
        format!("{}/{}", self.base(), id)
    }

    pub fn test(&self) -> String {
        format!("{}/test", self.base())
    }

    pub fn toggle(&self, id: i64) -> String {
        format!("{}/{}/toggle", self.base(), id)
    }

    pub fn by_client(&self, client_id: i64) -> String {
        format!("{}/client/{}", self.base(), client_id)
    }

    pub fn by_interface(&self, interface_id: i64) -> String {
        format!("{}/interface/{}", self.base(), interface_id)
    }
}

/// Derives the push channel URL from the general API base URL
/// (`http` becomes `ws`, `https` becomes `wss`).
pub fn websocket_url(api_base: &str, path: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}{}", base, path)
}

/// Joins a base URL and a relative path without doubling slashes.
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_paths_follow_connector_kind() {
        let sftp = ListenerEndpoints::new(ConnectorType::Sftp);
        assert_eq!(sftp.base(), "/api/sftp/config");
        assert_eq!(sftp.toggle(7), "/api/sftp/config/7/toggle");
        assert_eq!(sftp.by_client(3), "/api/sftp/config/client/3");

        let api = ListenerEndpoints::new(ConnectorType::Api);
        assert_eq!(api.test(), "/api/api/config/test");
        assert_eq!(
            ListenerEndpoints::new(ConnectorType::As2).by_interface(9),
            "/api/as2/config/interface/9"
        );
    }

    #[test]
    fn websocket_url_swaps_scheme() {
        assert_eq!(
            websocket_url("http://localhost:8080/", MONITORING_CHANNEL),
            "ws://localhost:8080/ws/monitoring"
        );
        assert_eq!(
            websocket_url("https://mw.example.com", MONITORING_CHANNEL),
            "wss://mw.example.com/ws/monitoring"
        );
    }

    #[test]
    fn join_normalises_slashes() {
        assert_eq!(join("http://a:1/", "/api/clients"), "http://a:1/api/clients");
        assert_eq!(join("http://a:1", "api/clients"), "http://a:1/api/clients");
    }
}
