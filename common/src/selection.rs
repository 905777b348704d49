//! Client and interface selection shared by the configuration pages.
//!
//! The interface list always belongs to the selected client. Changing the
//! client clears the selected interface and the list before the reload for
//! the new client is issued, and a completion for any other client or any
//! older request is dropped.

use crate::error::{ApiError, PERMISSION_DENIED_MESSAGE};
use crate::model::client::Client;
use crate::model::interface::Interface;
use crate::resource::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Load {
    Clients,
    Interfaces { client_id: i64 },
}

/// Handed out when a load starts and returned with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub request: RequestId,
    pub load: Load,
}

impl RequestTicket {
    fn new(load: Load) -> Self {
        Self {
            request: RequestId::next(),
            load,
        }
    }

    pub fn client_id(&self) -> Option<i64> {
        match self.load {
            Load::Interfaces { client_id } => Some(client_id),
            Load::Clients => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The completion belonged to a superseded request.
    Stale,
    /// 401/403: all state was cleared, the shell must go to the login page.
    RedirectToLogin,
    /// Any other failure; `error` holds a message the operator can retry from.
    Retryable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    clients: Vec<Client>,
    interfaces: Vec<Interface>,
    selected_client: Option<Client>,
    selected_interface: Option<Interface>,
    error: Option<String>,
    clients_request: Option<RequestId>,
    interfaces_request: Option<RequestTicket>,
    /// Interface to re-select once the current interface load lands.
    pending_interface: Option<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.selected_client.as_ref()
    }

    pub fn selected_interface(&self) -> Option<&Interface> {
        self.selected_interface.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.clients_request.is_some() || self.interfaces_request.is_some()
    }

    pub fn is_loading_interfaces(&self) -> bool {
        self.interfaces_request.is_some()
    }

    /// Both a client and an interface are selected.
    pub fn scope(&self) -> Option<(&Client, &Interface)> {
        self.selected_client.as_ref().zip(self.selected_interface.as_ref())
    }

    /// Value to store under `selectedClientId`; `None` means remove the key.
    pub fn persisted_client_id(&self) -> Option<i64> {
        self.selected_client.as_ref().map(|c| c.id)
    }

    /// Value to store under `selectedInterfaceId`.
    pub fn persisted_interface_id(&self) -> Option<i64> {
        self.selected_interface.as_ref().map(|i| i.id)
    }

    pub fn begin_clients_load(&mut self) -> RequestTicket {
        let ticket = RequestTicket::new(Load::Clients);
        self.clients_request = Some(ticket.request);
        self.error = None;
        ticket
    }

    pub fn clients_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Client>, ApiError>,
    ) -> Outcome {
        if ticket.load != Load::Clients || self.clients_request != Some(ticket.request) {
            return Outcome::Stale;
        }
        self.clients_request = None;
        match result {
            Ok(clients) => {
                if let Some(id) = self.persisted_client_id() {
                    if let Some(fresh) = clients.iter().find(|c| c.id == id) {
                        self.selected_client = Some(fresh.clone());
                    }
                }
                self.clients = clients;
                Outcome::Applied
            }
            Err(err) => self.fail(&err, "load clients"),
        }
    }

    /// Selects a client after a reload, as persisted from a previous
    /// session. Ignored when the id is no longer listed.
    pub fn restore(&mut self, client_id: i64, interface_id: Option<i64>) -> Option<RequestTicket> {
        let client = self.clients.iter().find(|c| c.id == client_id)?.clone();
        let ticket = self.select_client(Some(client));
        self.pending_interface = interface_id;
        ticket
    }

    /// Clears the selected interface and the interface list, then records
    /// the new client. Returns the ticket of the interface reload to issue.
    pub fn select_client(&mut self, client: Option<Client>) -> Option<RequestTicket> {
        self.selected_interface = None;
        self.interfaces.clear();
        self.interfaces_request = None;
        self.pending_interface = None;
        self.selected_client = client;
        self.begin_interfaces_refresh()
    }

    /// `None` when no client is selected. The current list and the selected
    /// interface stay in place until the reload succeeds.
    pub fn begin_interfaces_refresh(&mut self) -> Option<RequestTicket> {
        let Some(client) = &self.selected_client else {
            self.interfaces.clear();
            self.interfaces_request = None;
            return None;
        };
        let ticket = RequestTicket::new(Load::Interfaces {
            client_id: client.id,
        });
        self.interfaces_request = Some(ticket);
        self.error = None;
        Some(ticket)
    }

    pub fn interfaces_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Interface>, ApiError>,
    ) -> Outcome {
        let current_client = self.selected_client.as_ref().map(|c| c.id);
        if self.interfaces_request != Some(ticket) || ticket.client_id() != current_client {
            return Outcome::Stale;
        }
        self.interfaces_request = None;
        match result {
            Ok(interfaces) => {
                let client_id = ticket.client_id();
                self.interfaces = interfaces
                    .into_iter()
                    .filter(|i| Some(i.client.id) == client_id)
                    .collect();
                let keep = self
                    .pending_interface
                    .take()
                    .or_else(|| self.persisted_interface_id());
                if let Some(id) = keep {
                    self.selected_interface = self.interfaces.iter().find(|i| i.id == id).cloned();
                }
                Outcome::Applied
            }
            Err(err) => self.fail(&err, "load interfaces"),
        }
    }

    /// Returns `false` when the interface does not belong to the selected client.
    pub fn select_interface(&mut self, interface: Option<Interface>) -> bool {
        self.pending_interface = None;
        match interface {
            None => {
                self.selected_interface = None;
                true
            }
            Some(interface) => {
                if self.persisted_client_id() != Some(interface.client.id) {
                    return false;
                }
                self.selected_interface = Some(interface);
                true
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Forgets everything, including in-flight requests.
    pub fn clear_all(&mut self) {
        *self = Selection::default();
    }

    fn fail(&mut self, err: &ApiError, action: &str) -> Outcome {
        if err.is_session_invalid() {
            self.clear_all();
            self.error = Some(match err {
                ApiError::Forbidden => PERMISSION_DENIED_MESSAGE.to_string(),
                other => other.to_string(),
            });
            return Outcome::RedirectToLogin;
        }
        self.error = Some(match err {
            ApiError::Status { message, .. } | ApiError::NotFound(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            _ => format!("Failed to {}. Please try again.", action),
        });
        Outcome::Retryable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::client::EntityRef;

    fn client(id: i64) -> Client {
        Client {
            id,
            name: format!("Client {}", id),
            code: format!("C{}", id),
            description: None,
            status: "ACTIVE".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn interface(id: i64, client_id: i64) -> Interface {
        Interface {
            id,
            name: format!("Interface {}", id),
            interface_type: "XML".into(),
            description: None,
            schema_path: None,
            root_element: "Order".into(),
            namespace: None,
            client: EntityRef::new(client_id),
            is_active: true,
            priority: 0,
            status: None,
            configuration: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded_with_clients(ids: &[i64]) -> Selection {
        let mut selection = Selection::new();
        let ticket = selection.begin_clients_load();
        let clients = ids.iter().copied().map(client).collect();
        assert_eq!(selection.clients_loaded(ticket, Ok(clients)), Outcome::Applied);
        selection
    }

    #[test]
    fn selecting_client_clears_interface_before_reload_lands() {
        let mut selection = loaded_with_clients(&[3, 5]);
        let ticket = selection.select_client(Some(client(3))).unwrap();
        selection.interfaces_loaded(ticket, Ok(vec![interface(30, 3)]));
        assert!(selection.select_interface(Some(interface(30, 3))));

        let next = selection.select_client(Some(client(5)));
        assert!(next.is_some());
        assert!(selection.selected_interface().is_none());
        assert!(selection.interfaces().is_empty());
        assert!(selection.is_loading_interfaces());
    }

    #[test]
    fn client_five_shows_only_its_interfaces() {
        let mut selection = loaded_with_clients(&[3, 5]);
        let for_three = selection.select_client(Some(client(3))).unwrap();
        let for_five = selection.select_client(Some(client(5))).unwrap();

        let applied = selection.interfaces_loaded(
            for_five,
            Ok(vec![interface(50, 5), interface(51, 5)]),
        );
        assert_eq!(applied, Outcome::Applied);

        let late = selection.interfaces_loaded(for_three, Ok(vec![interface(30, 3)]));
        assert_eq!(late, Outcome::Stale);

        let ids: Vec<i64> = selection.interfaces().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![50, 51]);
        assert_eq!(selection.persisted_client_id(), Some(5));
    }

    #[test]
    fn manual_refresh_supersedes_earlier_load() {
        let mut selection = loaded_with_clients(&[5]);
        let first = selection.select_client(Some(client(5))).unwrap();
        let second = selection.begin_interfaces_refresh().unwrap();

        assert_eq!(
            selection.interfaces_loaded(first, Ok(vec![interface(1, 5)])),
            Outcome::Stale
        );
        assert!(selection.interfaces().is_empty());
        assert_eq!(
            selection.interfaces_loaded(second, Ok(vec![interface(2, 5)])),
            Outcome::Applied
        );
        assert_eq!(selection.interfaces()[0].id, 2);
    }

    #[test]
    fn refresh_failure_keeps_selected_interface() {
        let mut selection = loaded_with_clients(&[3]);
        let ticket = selection.select_client(Some(client(3))).unwrap();
        selection.interfaces_loaded(ticket, Ok(vec![interface(30, 3), interface(31, 3)]));
        assert!(selection.select_interface(Some(interface(30, 3))));

        let refresh = selection.begin_interfaces_refresh().unwrap();
        assert_eq!(selection.persisted_interface_id(), Some(30));
        assert!(selection.scope().is_some());

        let outcome =
            selection.interfaces_loaded(refresh, Err(ApiError::Network("timed out".into())));
        assert_eq!(outcome, Outcome::Retryable);
        assert_eq!(selection.persisted_interface_id(), Some(30));
        assert_eq!(selection.interfaces().len(), 2);
        assert!(!selection.is_loading_interfaces());
    }

    #[test]
    fn refresh_drops_interface_missing_from_new_list() {
        let mut selection = loaded_with_clients(&[3]);
        let ticket = selection.select_client(Some(client(3))).unwrap();
        selection.interfaces_loaded(ticket, Ok(vec![interface(30, 3), interface(31, 3)]));
        selection.select_interface(Some(interface(31, 3)));

        let refresh = selection.begin_interfaces_refresh().unwrap();
        selection.interfaces_loaded(refresh, Ok(vec![interface(31, 3)]));
        assert_eq!(selection.persisted_interface_id(), Some(31));

        let refresh = selection.begin_interfaces_refresh().unwrap();
        selection.interfaces_loaded(refresh, Ok(vec![interface(30, 3)]));
        assert!(selection.selected_interface().is_none());
        assert_eq!(selection.interfaces()[0].id, 30);
    }

    #[test]
    fn clearing_client_empties_interfaces_and_persistence() {
        let mut selection = loaded_with_clients(&[3]);
        let ticket = selection.select_client(Some(client(3))).unwrap();
        selection.interfaces_loaded(ticket, Ok(vec![interface(30, 3)]));

        assert!(selection.select_client(None).is_none());
        assert!(selection.interfaces().is_empty());
        assert_eq!(selection.persisted_client_id(), None);
        assert!(!selection.is_loading());
    }

    #[test]
    fn forbidden_clears_everything_with_distinct_message() {
        let mut selection = loaded_with_clients(&[3]);
        let ticket = selection.select_client(Some(client(3))).unwrap();
        selection.interfaces_loaded(ticket, Ok(vec![interface(30, 3)]));
        selection.select_interface(Some(interface(30, 3)));

        let refresh = selection.begin_interfaces_refresh().unwrap();
        let outcome = selection.interfaces_loaded(refresh, Err(ApiError::Forbidden));

        assert_eq!(outcome, Outcome::RedirectToLogin);
        assert!(selection.clients().is_empty());
        assert!(selection.interfaces().is_empty());
        assert!(selection.selected_client().is_none());
        assert!(selection.selected_interface().is_none());
        assert_eq!(selection.error(), Some(PERMISSION_DENIED_MESSAGE));
    }

    #[test]
    fn generic_failure_is_retryable_and_differs_from_forbidden() {
        let mut selection = Selection::new();
        let ticket = selection.begin_clients_load();
        let outcome =
            selection.clients_loaded(ticket, Err(ApiError::Network("connection reset".into())));
        assert_eq!(outcome, Outcome::Retryable);
        assert_eq!(
            selection.error(),
            Some("Failed to load clients. Please try again.")
        );
        assert_ne!(selection.error(), Some(PERMISSION_DENIED_MESSAGE));

        selection.begin_clients_load();
        assert!(selection.error().is_none());
    }

    #[test]
    fn restore_reselects_persisted_interface() {
        let mut selection = loaded_with_clients(&[3, 5]);
        let ticket = selection.restore(5, Some(51)).unwrap();
        selection.interfaces_loaded(ticket, Ok(vec![interface(50, 5), interface(51, 5)]));
        assert_eq!(selection.persisted_interface_id(), Some(51));

        assert!(selection.restore(99, None).is_none());
    }

    #[test]
    fn foreign_interface_cannot_be_selected() {
        let mut selection = loaded_with_clients(&[3]);
        selection.select_client(Some(client(3)));
        assert!(!selection.select_interface(Some(interface(50, 5))));
        assert!(selection.selected_interface().is_none());
    }
}
