//! Hash routes of the console (`#/listener-config/sftp/4`).

use std::fmt;

pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    ApiConfig,
    SftpList,
    SftpNew,
    SftpEdit(i64),
    As2List,
    As2New,
    As2Edit(i64),
    Monitoring,
    Clients,
    Interfaces,
    Transform,
    Users,
    AuditLogs,
    NotFound,
}

impl Route {
    /// Parses a location hash, with or without the leading `#`.
    pub fn parse(hash: &str) -> Route {
        let path = hash.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["listener-config", "api"] => Route::ApiConfig,
            ["listener-config", "sftp"] => Route::SftpList,
            ["listener-config", "sftp", "new"] => Route::SftpNew,
            ["listener-config", "sftp", id] => id.parse().map_or(Route::NotFound, Route::SftpEdit),
            ["listener-config", "as2"] => Route::As2List,
            ["listener-config", "as2", "new"] => Route::As2New,
            ["listener-config", "as2", id] => id.parse().map_or(Route::NotFound, Route::As2Edit),
            ["listener-config", "monitoring"] => Route::Monitoring,
            ["inbound-config", "clients"] => Route::Clients,
            ["inbound-config", "interfaces"] => Route::Interfaces,
            ["inbound-config", "transform"] => Route::Transform,
            ["admin", "users"] => Route::Users,
            ["admin", "audit-logs"] => Route::AuditLogs,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home | Route::NotFound => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::ApiConfig => "/listener-config/api".to_string(),
            Route::SftpList => "/listener-config/sftp".to_string(),
            Route::SftpNew => "/listener-config/sftp/new".to_string(),
            Route::SftpEdit(id) => format!("/listener-config/sftp/{}", id),
            Route::As2List => "/listener-config/as2".to_string(),
            Route::As2New => "/listener-config/as2/new".to_string(),
            Route::As2Edit(id) => format!("/listener-config/as2/{}", id),
            Route::Monitoring => "/listener-config/monitoring".to_string(),
            Route::Clients => "/inbound-config/clients".to_string(),
            Route::Interfaces => "/inbound-config/interfaces".to_string(),
            Route::Transform => "/inbound-config/transform".to_string(),
            Route::Users => "/admin/users".to_string(),
            Route::AuditLogs => "/admin/audit-logs".to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn required_role(&self) -> Option<&'static str> {
        match self {
            Route::Users | Route::AuditLogs => Some(ROLE_ADMIN),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home | Route::NotFound => "Home",
            Route::Login => "Sign in",
            Route::ApiConfig => "API Configuration",
            Route::SftpList | Route::SftpNew | Route::SftpEdit(_) => "SFTP Configuration",
            Route::As2List | Route::As2New | Route::As2Edit(_) => "AS2 Configuration",
            Route::Monitoring => "Monitoring",
            Route::Clients => "Clients",
            Route::Interfaces => "Interfaces",
            Route::Transform => "Transform",
            Route::Users => "User Management",
            Route::AuditLogs => "Audit Logs",
        }
    }

    /// The list page a form returns to after saving.
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::SftpNew | Route::SftpEdit(_) => Some(Route::SftpList),
            Route::As2New | Route::As2Edit(_) => Some(Route::As2List),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSection {
    pub title: &'static str,
    pub icon: &'static str,
    pub items: &'static [NavItem],
    pub role: Option<&'static str>,
}

pub const NAV_SECTIONS: &[NavSection] = &[
    NavSection {
        title: "Listener Configuration",
        icon: "settings_input_component",
        items: &[
            NavItem { label: "API Configuration", icon: "api", route: Route::ApiConfig },
            NavItem { label: "SFTP Configuration", icon: "storage", route: Route::SftpList },
            NavItem { label: "AS2 Configuration", icon: "swap_horiz", route: Route::As2List },
            NavItem { label: "Monitoring", icon: "monitor_heart", route: Route::Monitoring },
        ],
        role: None,
    },
    NavSection {
        title: "Inbound Configuration",
        icon: "cloud_upload",
        items: &[
            NavItem { label: "Clients", icon: "people", route: Route::Clients },
            NavItem { label: "Interfaces", icon: "code", route: Route::Interfaces },
            NavItem { label: "Transform", icon: "transform", route: Route::Transform },
        ],
        role: None,
    },
    NavSection {
        title: "Administration",
        icon: "security",
        items: &[
            NavItem { label: "User Management", icon: "manage_accounts", route: Route::Users },
            NavItem { label: "Audit Logs", icon: "assessment", route: Route::AuditLogs },
        ],
        role: Some(ROLE_ADMIN),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_round_trips() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::ApiConfig,
            Route::SftpList,
            Route::SftpNew,
            Route::SftpEdit(12),
            Route::As2List,
            Route::As2New,
            Route::As2Edit(3),
            Route::Monitoring,
            Route::Clients,
            Route::Interfaces,
            Route::Transform,
            Route::Users,
            Route::AuditLogs,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.href()), route, "{}", route);
        }
    }

    #[test]
    fn unknown_paths_and_bad_ids() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/listener-config/sftp/abc"), Route::NotFound);
        assert_eq!(Route::parse("#/history"), Route::NotFound);
        assert_eq!(Route::parse("#/admin/users?page=2"), Route::Users);
    }

    #[test]
    fn admin_pages_need_admin_role() {
        assert_eq!(Route::AuditLogs.required_role(), Some(ROLE_ADMIN));
        assert_eq!(Route::Transform.required_role(), None);
        assert!(!Route::Login.requires_auth());
        assert_eq!(Route::SftpEdit(1).parent(), Some(Route::SftpList));
    }
}
