//! Table of connector configurations for the selected client/interface.

use std::marker::PhantomData;

use common::cache::ConfigCache;
use common::error::ApiResult;
use common::resource::{Operation, OperationFlags, RequestId};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{report, ConnectorPage};
use crate::api::connectors::ConnectorService;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::form::{empty_state, error_banner, icon_button, row_action, spinner};
use crate::components::selector::ClientInterfaceSelector;
use crate::components::status_indicator::active_chip;
use crate::components::toast::{show_toast, Severity};
use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;
use crate::context::subscribe;
use crate::router;

type ListScope = (Option<i64>, Option<i64>);

pub enum Msg<K> {
    AuthChanged(AuthContext),
    SelectionChanged(SelectionContext),
    Reload,
    Loaded(Operation, RequestId, ApiResult<Vec<K>>),
    Toggle(i64),
    Toggled(RequestId, ApiResult<K>),
    AskDelete(i64),
    CancelDelete,
    ConfirmDelete,
    Deleted(RequestId, i64, ApiResult<()>),
    Dismiss(Operation),
}

pub struct ConnectorList<K: ConnectorPage> {
    cache: ConfigCache<K>,
    flags: OperationFlags,
    list_request: Option<RequestId>,
    loaded_scope: Option<ListScope>,
    pending_delete: Option<i64>,
    auth: Option<AuthContext>,
    selection: Option<SelectionContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    _selection_handle: Option<ContextHandle<SelectionContext>>,
    kind: PhantomData<K>,
}

impl<K: ConnectorPage> ConnectorList<K> {
    fn scope(&self) -> ListScope {
        match &self.selection {
            Some(selection) => (
                selection.state.selected_client().map(|c| c.id),
                selection.state.selected_interface().map(|i| i.id),
            ),
            None => (None, None),
        }
    }

    fn service(&self) -> Option<ConnectorService<K>> {
        self.auth.as_ref().map(|auth| ConnectorService::new(&auth.api))
    }

    fn reload(&mut self, ctx: &Context<Self>) {
        let Some(service) = self.service() else {
            return;
        };
        let scope = self.scope();
        let op = match scope {
            (_, Some(_)) => Operation::FetchByInterface,
            (Some(_), None) => Operation::FetchByClient,
            (None, None) => Operation::FetchAll,
        };
        let request = self.flags.begin(op);
        self.list_request = Some(request);
        self.loaded_scope = Some(scope);

        let link = ctx.link().clone();
        spawn_local(async move {
            let result = match scope {
                (_, Some(interface_id)) => service.fetch_by_interface(interface_id).await,
                (Some(client_id), None) => service.fetch_by_client(client_id).await,
                (None, None) => service.fetch_all().await,
            };
            link.send_message(Msg::Loaded(op, request, result));
        });
    }

    fn visible(&self) -> Vec<&K> {
        match self.scope() {
            (Some(client_id), interface_id) => self.cache.scoped(client_id, interface_id),
            (None, _) => self.cache.items().iter().collect(),
        }
    }

    fn view_table(&self, ctx: &Context<Self>, rows: &[&K]) -> Html {
        let link = ctx.link();
        html! {
            <table class="data-table">
                <thead>
                    <tr>
                        { for K::columns().iter().map(|c| html! { <th>{ *c }</th> }) }
                        <th>{"Status"}</th>
                        <th class="actions">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().filter_map(|config| {
                        let id = config.id()?;
                        let edit_route = K::edit_route(id);
                        Some(html! {
                            <tr key={id.to_string()}>
                                { for config.cells().into_iter().map(|cell| html! { <td>{ cell }</td> }) }
                                <td>{ active_chip(config.is_active()) }</td>
                                <td class="actions">
                                    { row_action(
                                        if config.is_active() { "toggle_on" } else { "toggle_off" },
                                        if config.is_active() { "Deactivate" } else { "Activate" },
                                        link.callback(move |_| Msg::Toggle(id)),
                                    ) }
                                    if let Some(route) = edit_route {
                                        { row_action("edit", "Edit", Callback::from(move |_| router::navigate(route))) }
                                    }
                                    { row_action("delete", "Delete", link.callback(move |_| Msg::AskDelete(id))) }
                                </td>
                            </tr>
                        })
                    }) }
                </tbody>
            </table>
        }
    }
}

impl<K: ConnectorPage> Component for ConnectorList<K> {
    type Message = Msg<K>;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let (selection, selection_handle) = subscribe(link, link.callback(Msg::SelectionChanged));
        let mut list = Self {
            cache: ConfigCache::default(),
            flags: OperationFlags::new(),
            list_request: None,
            loaded_scope: None,
            pending_delete: None,
            auth,
            selection,
            _auth_handle: auth_handle,
            _selection_handle: selection_handle,
            kind: PhantomData,
        };
        list.reload(ctx);
        list
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => {
                self.auth = Some(auth);
                false
            }
            Msg::SelectionChanged(selection) => {
                self.selection = Some(selection);
                if self.loaded_scope != Some(self.scope()) {
                    self.reload(ctx);
                }
                true
            }
            Msg::Reload => {
                self.reload(ctx);
                true
            }
            Msg::Loaded(op, request, result) => {
                if self.list_request != Some(request) {
                    return false;
                }
                self.list_request = None;
                match result {
                    Ok(items) => {
                        self.flags.succeed(op, request);
                        self.cache.replace_all(items);
                    }
                    Err(err) => {
                        report(self.auth.as_ref(), op.label(), &err);
                        self.flags.fail(op, request, &err);
                    }
                }
                true
            }
            Msg::Toggle(id) => {
                let Some(service) = self.service() else {
                    return false;
                };
                let request = self.flags.begin(Operation::Toggle);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = service.toggle(id).await;
                    link.send_message(Msg::Toggled(request, result));
                });
                true
            }
            Msg::Toggled(request, result) => match result {
                Ok(record) => {
                    self.flags.succeed(Operation::Toggle, request);
                    let active = record.is_active();
                    if self.cache.replace(record) {
                        let state = if active { "activated" } else { "deactivated" };
                        show_toast(&format!("{} {}", K::TITLE, state), Severity::Success);
                    }
                    true
                }
                Err(err) => {
                    report(self.auth.as_ref(), Operation::Toggle.label(), &err);
                    self.flags.fail(Operation::Toggle, request, &err)
                }
            },
            Msg::AskDelete(id) => {
                self.pending_delete = Some(id);
                true
            }
            Msg::CancelDelete => {
                self.pending_delete = None;
                true
            }
            Msg::ConfirmDelete => {
                let (Some(id), Some(service)) = (self.pending_delete.take(), self.service())
                else {
                    return true;
                };
                let request = self.flags.begin(Operation::Delete);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = service.delete(id).await;
                    link.send_message(Msg::Deleted(request, id, result));
                });
                true
            }
            Msg::Deleted(request, id, result) => match self.cache.apply_delete(id, result) {
                Ok(_) => {
                    self.flags.succeed(Operation::Delete, request);
                    show_toast(&format!("{} deleted", K::TITLE), Severity::Success);
                    true
                }
                Err(err) => {
                    report(self.auth.as_ref(), Operation::Delete.label(), &err);
                    self.flags.fail(Operation::Delete, request, &err)
                }
            },
            Msg::Dismiss(op) => {
                self.flags.dismiss(op);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let rows = self.visible();
        let loading = self.list_request.is_some();
        let new_button = match K::new_route() {
            Some(route) => {
                icon_button("add", "New", Callback::from(move |_| router::navigate(route)), false)
            }
            None => html! {},
        };

        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{ K::TITLE }</h2>
                    <div class="toolbar">
                        { new_button }
                        { icon_button("refresh", "Refresh", link.callback(|_| Msg::Reload), loading) }
                    </div>
                </div>
                <ClientInterfaceSelector />
                { for self.flags.errors().map(|(op, message)| error_banner(
                    &format!("Failed to {}: {}", op.label(), message),
                    link.callback(move |_| Msg::Dismiss(op)),
                )) }
                <p class="muted">
                    { format!(
                        "{} configurations, {} active",
                        rows.len(),
                        rows.iter().filter(|c| c.is_active()).count(),
                    ) }
                </p>
                if loading {
                    { spinner() }
                } else if rows.is_empty() {
                    { empty_state("inbox", &format!("No {} found", K::NOUN)) }
                } else {
                    { self.view_table(ctx, &rows) }
                }
                <ConfirmDialog
                    open={self.pending_delete.is_some()}
                    title={format!("Delete {}", K::NOUN)}
                    message="This configuration will be removed permanently."
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_cancel={link.callback(|_| Msg::CancelDelete)}
                />
            </div>
        }
    }
}
