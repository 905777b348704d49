//! Interfaces of the selected client. The list comes from the selection
//! provider so the selector and this page never disagree.

use common::error::{ApiError, ApiResult};
use common::model::interface::{Interface, InterfaceInput};
use common::validation::{FieldErrors, Validate};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::form::{
    checkbox, empty_state, error_banner, icon_button, number_input, row_action, spinner, text_area,
    text_input,
};
use crate::components::selector::ClientInterfaceSelector;
use crate::components::status_indicator::active_chip;
use crate::components::toast::{report_error, show_toast, Severity};
use crate::components::top_sheet::TopSheet;
use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;
use crate::context::subscribe;

pub enum Msg {
    AuthChanged(AuthContext),
    SelectionChanged(SelectionContext),
    Refresh,
    New,
    Edit(Interface),
    Change(InterfaceInput),
    CloseEditor,
    Save,
    Saved(ApiResult<Interface>),
    AskDelete(Interface),
    CancelDelete,
    ConfirmDelete,
    Deleted(ApiResult<()>),
    DismissError,
}

struct Editor {
    id: Option<i64>,
    input: InterfaceInput,
    errors: FieldErrors,
    saving: bool,
}

pub struct InterfacesPage {
    editor: Option<Editor>,
    pending_delete: Option<Interface>,
    auth: Option<AuthContext>,
    selection: Option<SelectionContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    _selection_handle: Option<ContextHandle<SelectionContext>>,
}

fn optional(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

impl InterfacesPage {
    fn api(&self) -> Option<api::ApiClient> {
        self.auth.as_ref().map(|a| a.api.clone())
    }

    fn failed(&self, action: &str, err: &ApiError) {
        let expire = self.auth.as_ref().map(|a| a.expire.clone()).unwrap_or_else(Callback::noop);
        report_error(action, err, &expire);
    }

    fn refresh(&self) {
        if let Some(selection) = &self.selection {
            selection.refresh_interfaces.emit(());
        }
    }

    fn view_editor(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_close = link.callback(|_| Msg::CloseEditor);
        let Some(editor) = &self.editor else {
            return html! { <TopSheet open={false} title="Interface" {on_close} /> };
        };
        let input = &editor.input;
        let text = |apply: fn(&mut InterfaceInput, String)| {
            let base = input.clone();
            link.callback(move |value: String| {
                let mut next = base.clone();
                apply(&mut next, value);
                Msg::Change(next)
            })
        };
        let priority = {
            let base = input.clone();
            link.callback(move |value: u32| {
                let mut next = base.clone();
                next.priority = i32::try_from(value).unwrap_or(i32::MAX);
                Msg::Change(next)
            })
        };
        let active = {
            let base = input.clone();
            link.callback(move |value: bool| {
                let mut next = base.clone();
                next.is_active = value;
                Msg::Change(next)
            })
        };
        let actions = html! {
            <>
                <button class="btn" onclick={link.callback(|_| Msg::CloseEditor)}>{"Cancel"}</button>
                <button class="btn primary" disabled={editor.saving} onclick={link.callback(|_| Msg::Save)}>
                    { if editor.saving { "Saving..." } else { "Save" } }
                </button>
            </>
        };
        html! {
            <TopSheet open={true} title={if editor.id.is_some() { "Edit interface" } else { "New interface" }} {on_close} {actions}>
                { text_input("interfaceName", "Name", &input.name, editor.errors.get("name"), text(|i, v| i.name = v)) }
                { text_input("interfaceType", "Type", &input.interface_type, editor.errors.get("type"), text(|i, v| i.interface_type = v)) }
                { text_input("rootElement", "Root element", &input.root_element, editor.errors.get("rootElement"), text(|i, v| i.root_element = v)) }
                { text_input("namespace", "Namespace", input.namespace.as_deref().unwrap_or_default(), None,
                    text(|i, v| i.namespace = optional(v))) }
                { text_area("interfaceDescription", "Description", input.description.as_deref().unwrap_or_default(), None,
                    text(|i, v| i.description = optional(v))) }
                { number_input("priority", "Priority", u32::try_from(input.priority).unwrap_or_default(), None, priority) }
                { checkbox("interfaceActive", "Active", input.is_active, active) }
            </TopSheet>
        }
    }

    fn view_table(&self, ctx: &Context<Self>, interfaces: &[Interface]) -> Html {
        let link = ctx.link();
        html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Type"}</th>
                        <th>{"Root element"}</th>
                        <th>{"XSD"}</th>
                        <th>{"Priority"}</th>
                        <th>{"Active"}</th>
                        <th class="actions">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for interfaces.iter().map(|interface| {
                        let edit = interface.clone();
                        let delete = interface.clone();
                        html! {
                            <tr key={interface.id.to_string()}>
                                <td>
                                    { interface.name.clone() }
                                    if let Some(description) = &interface.description {
                                        <div class="muted">{ description.clone() }</div>
                                    }
                                </td>
                                <td>{ interface.interface_type.clone() }</td>
                                <td><code>{ interface.root_element.clone() }</code></td>
                                <td>{ interface.xsd_path().unwrap_or("-").to_string() }</td>
                                <td>{ interface.priority }</td>
                                <td>{ active_chip(interface.is_active) }</td>
                                <td class="actions">
                                    { row_action("edit", "Edit", link.callback(move |_| Msg::Edit(edit.clone()))) }
                                    { row_action("delete", "Delete", link.callback(move |_| Msg::AskDelete(delete.clone()))) }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    }
}

impl Component for InterfacesPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let (selection, selection_handle) = subscribe(link, link.callback(Msg::SelectionChanged));
        Self {
            editor: None,
            pending_delete: None,
            auth,
            selection,
            _auth_handle: auth_handle,
            _selection_handle: selection_handle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => {
                self.auth = Some(auth);
                false
            }
            Msg::SelectionChanged(selection) => {
                self.selection = Some(selection);
                true
            }
            Msg::Refresh => {
                self.refresh();
                false
            }
            Msg::New => {
                let client_id = self
                    .selection
                    .as_ref()
                    .and_then(|s| s.state.selected_client().map(|c| c.id));
                let Some(client_id) = client_id else {
                    show_toast("Select a client first", Severity::Info);
                    return false;
                };
                self.editor = Some(Editor {
                    id: None,
                    input: InterfaceInput::for_client(client_id),
                    errors: FieldErrors::new(),
                    saving: false,
                });
                true
            }
            Msg::Edit(interface) => {
                self.editor = Some(Editor {
                    id: Some(interface.id),
                    input: InterfaceInput::from(&interface),
                    errors: FieldErrors::new(),
                    saving: false,
                });
                true
            }
            Msg::Change(input) => {
                if let Some(editor) = &mut self.editor {
                    editor.input = input;
                }
                true
            }
            Msg::CloseEditor => {
                self.editor = None;
                true
            }
            Msg::Save => {
                let Some(api) = self.api() else {
                    return false;
                };
                let Some(editor) = &mut self.editor else {
                    return false;
                };
                if let Err(errors) = editor.input.validate() {
                    editor.errors = errors;
                    return true;
                }
                editor.errors = FieldErrors::new();
                editor.saving = true;
                let (id, input) = (editor.id, editor.input.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = match id {
                        Some(id) => api::clients::update_interface(&api, id, &input).await,
                        None => api::clients::create_interface(&api, &input).await,
                    };
                    link.send_message(Msg::Saved(result));
                });
                true
            }
            Msg::Saved(result) => {
                match result {
                    Ok(interface) => {
                        let saved = format!("Interface {} saved", interface.name);
                        show_toast(&saved, Severity::Success);
                        self.editor = None;
                        self.refresh();
                    }
                    Err(err) => {
                        self.failed("save interface", &err);
                        if let Some(editor) = &mut self.editor {
                            editor.saving = false;
                        }
                    }
                }
                true
            }
            Msg::AskDelete(interface) => {
                self.pending_delete = Some(interface);
                true
            }
            Msg::CancelDelete => {
                self.pending_delete = None;
                true
            }
            Msg::ConfirmDelete => {
                let (Some(interface), Some(api)) = (self.pending_delete.take(), self.api()) else {
                    return true;
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::clients::delete_interface(&api, interface.id).await;
                    link.send_message(Msg::Deleted(result));
                });
                true
            }
            Msg::Deleted(result) => {
                match result {
                    Ok(()) => {
                        show_toast("Interface deleted", Severity::Success);
                        self.refresh();
                    }
                    Err(err) => self.failed("delete interface", &err),
                }
                true
            }
            Msg::DismissError => {
                if let Some(selection) = &self.selection {
                    selection.dismiss_error.emit(());
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(selection) = &self.selection else {
            return spinner();
        };
        let state = &selection.state;
        let has_client = state.selected_client().is_some();
        let body = if let Some(message) = state.error() {
            error_banner(message, link.callback(|_| Msg::DismissError))
        } else if !has_client {
            empty_state("business", "Select a client to see its interfaces")
        } else if state.is_loading_interfaces() {
            spinner()
        } else if state.interfaces().is_empty() {
            empty_state("integration_instructions", "This client has no interfaces yet")
        } else {
            self.view_table(ctx, state.interfaces())
        };
        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{"Interfaces"}</h2>
                    <div class="toolbar">
                        { icon_button("add", "New interface", link.callback(|_| Msg::New), !has_client) }
                        { icon_button("refresh", "Refresh", link.callback(|_| Msg::Refresh), !has_client) }
                    </div>
                </div>
                <ClientInterfaceSelector with_interface={false} />
                { body }
                { self.view_editor(ctx) }
                <ConfirmDialog
                    open={self.pending_delete.is_some()}
                    title="Delete interface"
                    message={self.pending_delete.as_ref().map(|i| format!("Delete {} with its mappings and connectors?", i.name)).unwrap_or_default()}
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_cancel={link.callback(|_| Msg::CancelDelete)}
                />
            </div>
        }
    }
}
