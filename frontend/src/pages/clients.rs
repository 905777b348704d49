//! Paged client list with create, edit and delete.

use common::error::{ApiError, ApiResult};
use common::model::client::{Client, ClientInput};
use common::model::page::Page;
use common::requests::{PageQuery, SortDirection};
use common::resource::{RequestId, Resource};
use common::validation::{FieldErrors, Validate};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::form::{
    empty_state, error_banner, icon_button, row_action, select, spinner, text_area, text_input,
};
use crate::components::toast::{report_error, show_toast, Severity};
use crate::components::top_sheet::TopSheet;
use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;
use crate::context::subscribe;

const PAGE_SIZE: u32 = 10;

pub enum Msg {
    AuthChanged(AuthContext),
    SelectionChanged(SelectionContext),
    Load(u32),
    Loaded(RequestId, ApiResult<Page<Client>>),
    New,
    Edit(Client),
    Change(ClientInput),
    CloseEditor,
    Save,
    Saved(ApiResult<Client>),
    AskDelete(Client),
    CancelDelete,
    ConfirmDelete,
    Deleted(i64, ApiResult<()>),
    DismissError,
}

struct Editor {
    id: Option<i64>,
    input: ClientInput,
    errors: FieldErrors,
    saving: bool,
}

pub struct ClientsPage {
    page: Resource<Page<Client>>,
    page_number: u32,
    editor: Option<Editor>,
    pending_delete: Option<Client>,
    auth: Option<AuthContext>,
    selection: Option<SelectionContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    _selection_handle: Option<ContextHandle<SelectionContext>>,
}

impl ClientsPage {
    fn load(&mut self, ctx: &Context<Self>, page_number: u32) {
        let Some(api) = self.auth.as_ref().map(|a| a.api.clone()) else {
            return;
        };
        self.page_number = page_number;
        let request = self.page.start();
        let query =
            PageQuery::sorted_by("name", SortDirection::Asc).with_page(page_number, PAGE_SIZE);
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::clients::page(&api, &query).await;
            link.send_message(Msg::Loaded(request, result));
        });
    }

    fn failed(&self, action: &str, err: &ApiError) {
        let expire = self.auth.as_ref().map(|a| a.expire.clone()).unwrap_or_else(Callback::noop);
        report_error(action, err, &expire);
    }

    /// The selector keeps its own client list; tell it to reload.
    fn refresh_selector(&self) {
        if let Some(selection) = &self.selection {
            selection.refresh_clients.emit(());
        }
    }

    fn view_editor(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_close = link.callback(|_| Msg::CloseEditor);
        let Some(editor) = &self.editor else {
            return html! { <TopSheet open={false} title="Client" {on_close} /> };
        };
        let input = &editor.input;
        let change = |apply: fn(&mut ClientInput, String)| {
            let base = input.clone();
            link.callback(move |value: String| {
                let mut next = base.clone();
                apply(&mut next, value);
                Msg::Change(next)
            })
        };
        let statuses = ["ACTIVE", "INACTIVE"].map(|s| (s.to_string(), s.to_string()));
        let actions = html! {
            <>
                <button class="btn" onclick={link.callback(|_| Msg::CloseEditor)}>{"Cancel"}</button>
                <button class="btn primary" disabled={editor.saving} onclick={link.callback(|_| Msg::Save)}>
                    { if editor.saving { "Saving..." } else { "Save" } }
                </button>
            </>
        };
        html! {
            <TopSheet open={true} title={if editor.id.is_some() { "Edit client" } else { "New client" }} {on_close} {actions}>
                { text_input("clientName", "Name", &input.name, editor.errors.get("name"), change(|c, v| c.name = v)) }
                { text_input("clientCode", "Code", &input.code, editor.errors.get("code"), change(|c, v| c.code = v)) }
                { text_area("clientDescription", "Description", input.description.as_deref().unwrap_or_default(), None,
                    change(|c, v| c.description = (!v.trim().is_empty()).then_some(v))) }
                { select("clientStatus", "Status", &statuses, &input.status, change(|c, v| c.status = v)) }
            </TopSheet>
        }
    }

    fn view_table(&self, ctx: &Context<Self>, page: &Page<Client>) -> Html {
        let link = ctx.link();
        html! {
            <>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Code"}</th>
                            <th>{"Description"}</th>
                            <th>{"Status"}</th>
                            <th class="actions">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.content.iter().map(|client| {
                            let edit = client.clone();
                            let delete = client.clone();
                            html! {
                                <tr key={client.id.to_string()}>
                                    <td>{ client.name.clone() }</td>
                                    <td><code>{ client.code.clone() }</code></td>
                                    <td>{ client.description.clone().unwrap_or_default() }</td>
                                    <td>{ client.status.clone() }</td>
                                    <td class="actions">
                                        { row_action("edit", "Edit", link.callback(move |_| Msg::Edit(edit.clone()))) }
                                        { row_action("delete", "Delete", link.callback(move |_| Msg::AskDelete(delete.clone()))) }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                <div class="pager">
                    { icon_button("chevron_left", "Previous", link.callback({
                        let n = self.page_number;
                        move |_| Msg::Load(n.saturating_sub(1))
                    }), page.first) }
                    <span>{ format!("Page {} of {} ({} clients)", page.number + 1, page.total_pages.max(1), page.total_elements) }</span>
                    { icon_button("chevron_right", "Next", link.callback({
                        let n = self.page_number;
                        move |_| Msg::Load(n + 1)
                    }), page.last) }
                </div>
            </>
        }
    }
}

impl Component for ClientsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let (selection, selection_handle) = subscribe(link, link.callback(Msg::SelectionChanged));
        let mut page = Self {
            page: Resource::default(),
            page_number: 0,
            editor: None,
            pending_delete: None,
            auth,
            selection,
            _auth_handle: auth_handle,
            _selection_handle: selection_handle,
        };
        page.load(ctx, 0);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => {
                self.auth = Some(auth);
                false
            }
            Msg::SelectionChanged(selection) => {
                self.selection = Some(selection);
                false
            }
            Msg::Load(page_number) => {
                self.load(ctx, page_number);
                true
            }
            Msg::Loaded(request, result) => {
                if let Err(err) = &result {
                    if self.page.is_pending(request) {
                        self.failed("load clients", err);
                    }
                }
                self.page.complete(request, result)
            }
            Msg::New => {
                self.editor = Some(Editor {
                    id: None,
                    input: ClientInput::default(),
                    errors: FieldErrors::new(),
                    saving: false,
                });
                true
            }
            Msg::Edit(client) => {
                self.editor = Some(Editor {
                    id: Some(client.id),
                    input: ClientInput::from(&client),
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
                let Some(api) = self.auth.as_ref().map(|a| a.api.clone()) else {
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
                        Some(id) => api::clients::update(&api, id, &input).await,
                        None => api::clients::create(&api, &input).await,
                    };
                    link.send_message(Msg::Saved(result));
                });
                true
            }
            Msg::Saved(result) => {
                match result {
                    Ok(client) => {
                        show_toast(&format!("Client {} saved", client.name), Severity::Success);
                        self.editor = None;
                        self.refresh_selector();
                        self.load(ctx, self.page_number);
                    }
                    Err(err) => {
                        self.failed("save client", &err);
                        if let Some(editor) = &mut self.editor {
                            editor.saving = false;
                        }
                    }
                }
                true
            }
            Msg::AskDelete(client) => {
                self.pending_delete = Some(client);
                true
            }
            Msg::CancelDelete => {
                self.pending_delete = None;
                true
            }
            Msg::ConfirmDelete => {
                let api = self.auth.as_ref().map(|a| a.api.clone());
                let (Some(client), Some(api)) = (self.pending_delete.take(), api) else {
                    return true;
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::clients::delete(&api, client.id).await;
                    link.send_message(Msg::Deleted(client.id, result));
                });
                true
            }
            Msg::Deleted(id, result) => {
                match result {
                    Ok(()) => {
                        if let Some(page) = self.page.data_mut() {
                            page.content.retain(|c| c.id != id);
                        }
                        show_toast("Client deleted", Severity::Success);
                        self.refresh_selector();
                    }
                    Err(err) => self.failed("delete client", &err),
                }
                true
            }
            Msg::DismissError => {
                self.page.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let body = match &self.page {
            Resource::Loading { .. } => spinner(),
            Resource::Failure(message) => {
                error_banner(message, link.callback(|_| Msg::DismissError))
            }
            Resource::Success(page) if page.content.is_empty() => {
                empty_state("people", "No clients yet")
            }
            Resource::Success(page) => self.view_table(ctx, page),
            Resource::Idle => html! {},
        };
        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{"Clients"}</h2>
                    <div class="toolbar">
                        { icon_button("add", "New client", link.callback(|_| Msg::New), false) }
                        { icon_button("refresh", "Refresh", link.callback({
                            let n = self.page_number;
                            move |_| Msg::Load(n)
                        }), self.page.is_loading()) }
                    </div>
                </div>
                { body }
                { self.view_editor(ctx) }
                <ConfirmDialog
                    open={self.pending_delete.is_some()}
                    title="Delete client"
                    message={self.pending_delete.as_ref().map(|c| format!("Delete {} and all of its interfaces?", c.name)).unwrap_or_default()}
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_cancel={link.callback(|_| Msg::CancelDelete)}
                />
            </div>
        }
    }
}
