//! Provider of the client and interface selection shared by every
//! configuration page. The selected ids survive reloads through local
//! storage.

use std::rc::Rc;

use common::error::ApiResult;
use common::model::client::Client;
use common::model::interface::Interface;
use common::selection::{Outcome, RequestTicket, Selection};
use common::session::{SELECTED_CLIENT_KEY, SELECTED_INTERFACE_KEY};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::auth::AuthContext;
use super::subscribe;
use crate::api;
use crate::storage;

#[derive(Clone, PartialEq)]
pub struct SelectionContext {
    pub state: Rc<Selection>,
    pub select_client: Callback<Option<i64>>,
    pub select_interface: Callback<Option<i64>>,
    pub refresh_clients: Callback<()>,
    pub refresh_interfaces: Callback<()>,
    pub dismiss_error: Callback<()>,
}

pub enum Msg {
    AuthChanged(AuthContext),
    ClientsLoaded(RequestTicket, ApiResult<Vec<Client>>),
    InterfacesLoaded(RequestTicket, ApiResult<Vec<Interface>>),
    SelectClient(Option<i64>),
    SelectInterface(Option<i64>),
    RefreshClients,
    RefreshInterfaces,
    DismissError,
}

#[derive(Properties, PartialEq)]
pub struct SelectionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

pub struct SelectionProvider {
    selection: Rc<Selection>,
    auth: Option<AuthContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    select_client: Callback<Option<i64>>,
    select_interface: Callback<Option<i64>>,
    refresh_clients: Callback<()>,
    refresh_interfaces: Callback<()>,
    dismiss_error: Callback<()>,
}

impl SelectionProvider {
    fn is_authenticated(&self) -> bool {
        self.auth.as_ref().is_some_and(|a| a.state.is_authenticated())
    }

    fn load_clients(&mut self, ctx: &Context<Self>) {
        let Some(auth) = &self.auth else {
            return;
        };
        let ticket = Rc::make_mut(&mut self.selection).begin_clients_load();
        let api = auth.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::clients::all(&api).await;
            link.send_message(Msg::ClientsLoaded(ticket, result));
        });
    }

    fn load_interfaces(&self, ctx: &Context<Self>, ticket: Option<RequestTicket>) {
        let (Some(auth), Some(ticket)) = (&self.auth, ticket) else {
            return;
        };
        let Some(client_id) = ticket.client_id() else {
            return;
        };
        let api = auth.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::clients::interfaces_of(&api, client_id).await;
            link.send_message(Msg::InterfacesLoaded(ticket, result));
        });
    }

    fn persist(&self) {
        storage::set_id(SELECTED_CLIENT_KEY, self.selection.persisted_client_id());
        storage::set_id(SELECTED_INTERFACE_KEY, self.selection.persisted_interface_id());
    }

    /// Reacts to a completion outcome; the state itself is already updated.
    fn settle(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Applied => true,
            Outcome::Stale => false,
            Outcome::RedirectToLogin => {
                self.persist();
                if let Some(auth) = &self.auth {
                    auth.expire.emit(());
                }
                true
            }
            Outcome::Retryable => {
                if let Some(message) = self.selection.error() {
                    gloo_console::error!(message.to_string());
                }
                true
            }
        }
    }
}

impl Component for SelectionProvider {
    type Message = Msg;
    type Properties = SelectionProviderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, handle) = subscribe(link, link.callback(Msg::AuthChanged));
        if auth.is_none() {
            gloo_console::error!("SelectionProvider must be rendered inside AuthProvider");
        }

        let mut provider = Self {
            selection: Rc::new(Selection::new()),
            auth,
            _auth_handle: handle,
            select_client: link.callback(Msg::SelectClient),
            select_interface: link.callback(Msg::SelectInterface),
            refresh_clients: link.callback(|_| Msg::RefreshClients),
            refresh_interfaces: link.callback(|_| Msg::RefreshInterfaces),
            dismiss_error: link.callback(|_| Msg::DismissError),
        };
        if provider.is_authenticated() {
            provider.load_clients(ctx);
        }
        provider
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => {
                let was_authenticated = self.is_authenticated();
                let now_authenticated = auth.state.is_authenticated();
                self.auth = Some(auth);
                if now_authenticated && !was_authenticated {
                    self.load_clients(ctx);
                } else if was_authenticated && !now_authenticated {
                    Rc::make_mut(&mut self.selection).clear_all();
                    self.persist();
                }
                true
            }
            Msg::ClientsLoaded(ticket, result) => {
                let selection = Rc::make_mut(&mut self.selection);
                let outcome = selection.clients_loaded(ticket, result);
                let mut restore = None;
                if outcome == Outcome::Applied && selection.selected_client().is_none() {
                    if let Some(client_id) = storage::get_id(SELECTED_CLIENT_KEY) {
                        let interface_id = storage::get_id(SELECTED_INTERFACE_KEY);
                        restore = selection.restore(client_id, interface_id);
                    }
                }
                self.load_interfaces(ctx, restore);
                self.settle(outcome)
            }
            Msg::InterfacesLoaded(ticket, result) => {
                let outcome = Rc::make_mut(&mut self.selection).interfaces_loaded(ticket, result);
                if outcome == Outcome::Applied {
                    self.persist();
                }
                self.settle(outcome)
            }
            Msg::SelectClient(client_id) => {
                let selection = Rc::make_mut(&mut self.selection);
                let client = client_id
                    .and_then(|id| selection.clients().iter().find(|c| c.id == id).cloned());
                let ticket = selection.select_client(client);
                self.persist();
                self.load_interfaces(ctx, ticket);
                true
            }
            Msg::SelectInterface(interface_id) => {
                let selection = Rc::make_mut(&mut self.selection);
                let interface = interface_id
                    .and_then(|id| selection.interfaces().iter().find(|i| i.id == id).cloned());
                if !selection.select_interface(interface) {
                    gloo_console::warn!("Ignoring an interface of another client");
                    return false;
                }
                self.persist();
                true
            }
            Msg::RefreshClients => {
                self.load_clients(ctx);
                true
            }
            Msg::RefreshInterfaces => {
                let ticket = Rc::make_mut(&mut self.selection).begin_interfaces_refresh();
                self.load_interfaces(ctx, ticket);
                true
            }
            Msg::DismissError => {
                Rc::make_mut(&mut self.selection).dismiss_error();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let context = SelectionContext {
            state: self.selection.clone(),
            select_client: self.select_client.clone(),
            select_interface: self.select_interface.clone(),
            refresh_clients: self.refresh_clients.clone(),
            refresh_interfaces: self.refresh_interfaces.clone(),
            dismiss_error: self.dismiss_error.clone(),
        };
        html! {
            <ContextProvider<SelectionContext> {context}>
                { ctx.props().children.clone() }
            </ContextProvider<SelectionContext>>
        }
    }
}
