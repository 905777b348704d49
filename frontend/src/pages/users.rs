//! User administration. Visible to administrators only.

use common::error::{ApiError, ApiResult};
use common::model::user::{User, UserInput};
use common::resource::{RequestId, Resource};
use common::validation::{validate_new_user, FieldErrors};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::form::{
    checkbox, empty_state, error_banner, icon_button, row_action, select, spinner, text_input,
};
use crate::components::secure_field::SecureField;
use crate::components::status_indicator::active_chip;
use crate::components::toast::{report_error, show_toast, Severity};
use crate::components::top_sheet::TopSheet;
use crate::context::auth::AuthContext;
use crate::context::subscribe;

const ROLES: [&str; 2] = ["USER", "ADMIN"];

pub enum Msg {
    AuthChanged(AuthContext),
    Load,
    Loaded(RequestId, ApiResult<Vec<User>>),
    New,
    Change(UserInput),
    CloseEditor,
    Save,
    Saved(ApiResult<User>),
    ToggleEnabled(User),
    Updated(ApiResult<User>),
    AskDelete(User),
    CancelDelete,
    ConfirmDelete,
    Deleted(i64, ApiResult<()>),
    DismissError,
}

struct Editor {
    input: UserInput,
    errors: FieldErrors,
    saving: bool,
}

pub struct UsersPage {
    users: Resource<Vec<User>>,
    editor: Option<Editor>,
    pending_delete: Option<User>,
    auth: Option<AuthContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
}

impl UsersPage {
    fn api(&self) -> Option<api::ApiClient> {
        self.auth.as_ref().map(|a| a.api.clone())
    }

    fn load(&mut self, ctx: &Context<Self>) {
        let Some(api) = self.api() else {
            return;
        };
        let request = self.users.start();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::admin::users(&api).await;
            link.send_message(Msg::Loaded(request, result));
        });
    }

    fn failed(&self, action: &str, err: &ApiError) {
        let expire = self.auth.as_ref().map(|a| a.expire.clone()).unwrap_or_else(Callback::noop);
        report_error(action, err, &expire);
    }

    fn replace(&mut self, user: User) {
        if let Some(users) = self.users.data_mut() {
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => *existing = user,
                None => users.push(user),
            }
        }
    }

    fn view_editor(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_close = link.callback(|_| Msg::CloseEditor);
        let Some(editor) = &self.editor else {
            return html! { <TopSheet open={false} title="New user" {on_close} /> };
        };
        let input = &editor.input;
        let text = |apply: fn(&mut UserInput, String)| {
            let base = input.clone();
            link.callback(move |value: String| {
                let mut next = base.clone();
                apply(&mut next, value);
                Msg::Change(next)
            })
        };
        let enabled = {
            let base = input.clone();
            link.callback(move |value: bool| {
                Msg::Change(UserInput {
                    enabled: value,
                    ..base.clone()
                })
            })
        };
        let roles = ROLES.map(|r| (r.to_string(), r.to_string()));
        let role = input.roles.first().cloned().unwrap_or_default();
        let actions = html! {
            <>
                <button class="btn" onclick={link.callback(|_| Msg::CloseEditor)}>{"Cancel"}</button>
                <button class="btn primary" disabled={editor.saving} onclick={link.callback(|_| Msg::Save)}>
                    { if editor.saving { "Creating..." } else { "Create user" } }
                </button>
            </>
        };
        html! {
            <TopSheet open={true} title="New user" {on_close} {actions}>
                { text_input("username", "Username", &input.username, editor.errors.get("username"), text(|u, v| u.username = v)) }
                { text_input("email", "Email", &input.email, editor.errors.get("email"), text(|u, v| u.email = v)) }
                { text_input("firstName", "First name", &input.first_name, None, text(|u, v| u.first_name = v)) }
                { text_input("lastName", "Last name", &input.last_name, None, text(|u, v| u.last_name = v)) }
                <SecureField
                    id="userPassword"
                    label="Password"
                    value={input.password.clone().unwrap_or_default()}
                    error={editor.errors.get("password").map(|e| AttrValue::from(e.to_string()))}
                    on_change={text(|u, v| u.password = (!v.is_empty()).then_some(v))}
                />
                { select("role", "Role", &roles, &role, text(|u, v| u.roles = vec![v])) }
                { checkbox("userEnabled", "Enabled", input.enabled, enabled) }
            </TopSheet>
        }
    }

    fn view_table(&self, ctx: &Context<Self>, users: &[User]) -> Html {
        let link = ctx.link();
        let me = self.auth.as_ref().and_then(|a| a.state.user().map(|u| u.username.clone()));
        html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"User"}</th>
                        <th>{"Email"}</th>
                        <th>{"Roles"}</th>
                        <th>{"Last login"}</th>
                        <th>{"Enabled"}</th>
                        <th class="actions">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for users.iter().map(|user| {
                        let toggle = user.clone();
                        let delete = user.clone();
                        let is_me = me.as_deref() == Some(user.username.as_str());
                        html! {
                            <tr key={user.id.to_string()}>
                                <td>
                                    { user.display_name() }
                                    <div class="muted">{ user.username.clone() }</div>
                                </td>
                                <td>{ user.email.clone() }</td>
                                <td>{ user.roles.join(", ") }</td>
                                <td>{ user.last_login.clone().unwrap_or_else(|| "Never".into()) }</td>
                                <td>
                                    { active_chip(user.enabled) }
                                    if user.account_locked {
                                        <span class="status-chip status-error">{"Locked"}</span>
                                    }
                                </td>
                                <td class="actions">
                                    if !is_me {
                                        { row_action(if user.enabled { "block" } else { "check_circle" },
                                            if user.enabled { "Disable" } else { "Enable" },
                                            link.callback(move |_| Msg::ToggleEnabled(toggle.clone()))) }
                                        { row_action("delete", "Delete", link.callback(move |_| Msg::AskDelete(delete.clone()))) }
                                    }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    }
}

impl Component for UsersPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let mut page = Self {
            users: Resource::default(),
            editor: None,
            pending_delete: None,
            auth,
            _auth_handle: auth_handle,
        };
        page.load(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => {
                self.auth = Some(auth);
                false
            }
            Msg::Load => {
                self.load(ctx);
                true
            }
            Msg::Loaded(request, result) => {
                if let (Err(err), true) = (&result, self.users.is_pending(request)) {
                    self.failed("load users", err);
                }
                self.users.complete(request, result)
            }
            Msg::New => {
                self.editor = Some(Editor {
                    input: UserInput::default(),
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
                if let Err(errors) = validate_new_user(&editor.input) {
                    editor.errors = errors;
                    return true;
                }
                editor.errors = FieldErrors::new();
                editor.saving = true;
                let input = editor.input.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::admin::create_user(&api, &input).await;
                    link.send_message(Msg::Saved(result));
                });
                true
            }
            Msg::Saved(result) => {
                match result {
                    Ok(user) => {
                        show_toast(&format!("User {} created", user.username), Severity::Success);
                        self.editor = None;
                        self.replace(user);
                    }
                    Err(err) => {
                        self.failed("create user", &err);
                        if let Some(editor) = &mut self.editor {
                            editor.saving = false;
                        }
                    }
                }
                true
            }
            Msg::ToggleEnabled(user) => {
                let Some(api) = self.api() else {
                    return false;
                };
                let input = UserInput {
                    enabled: !user.enabled,
                    ..UserInput::from(&user)
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::admin::update_user(&api, user.id, &input).await;
                    link.send_message(Msg::Updated(result));
                });
                false
            }
            Msg::Updated(result) => {
                match result {
                    Ok(user) => {
                        let state = if user.enabled { "enabled" } else { "disabled" };
                        show_toast(&format!("User {} {}", user.username, state), Severity::Success);
                        self.replace(user);
                    }
                    Err(err) => self.failed("update user", &err),
                }
                true
            }
            Msg::AskDelete(user) => {
                self.pending_delete = Some(user);
                true
            }
            Msg::CancelDelete => {
                self.pending_delete = None;
                true
            }
            Msg::ConfirmDelete => {
                let (Some(user), Some(api)) = (self.pending_delete.take(), self.api()) else {
                    return true;
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::admin::delete_user(&api, user.id).await;
                    link.send_message(Msg::Deleted(user.id, result));
                });
                true
            }
            Msg::Deleted(id, result) => {
                match result {
                    Ok(()) => {
                        if let Some(users) = self.users.data_mut() {
                            users.retain(|u| u.id != id);
                        }
                        show_toast("User deleted", Severity::Success);
                    }
                    Err(err) => self.failed("delete user", &err),
                }
                true
            }
            Msg::DismissError => {
                self.users.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let body = match &self.users {
            Resource::Loading { .. } => spinner(),
            Resource::Failure(message) => {
                error_banner(message, link.callback(|_| Msg::DismissError))
            }
            Resource::Success(users) if users.is_empty() => empty_state("group", "No users"),
            Resource::Success(users) => self.view_table(ctx, users),
            Resource::Idle => html! {},
        };
        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{"Users"}</h2>
                    <div class="toolbar">
                        { icon_button("person_add", "New user", link.callback(|_| Msg::New), false) }
                        { icon_button("refresh", "Refresh", link.callback(|_| Msg::Load), self.users.is_loading()) }
                    </div>
                </div>
                { body }
                { self.view_editor(ctx) }
                <ConfirmDialog
                    open={self.pending_delete.is_some()}
                    title="Delete user"
                    message={self.pending_delete.as_ref().map(|u| format!("Delete the account {}?", u.username)).unwrap_or_default()}
                    on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                    on_cancel={link.callback(|_| Msg::CancelDelete)}
                />
            </div>
        }
    }
}
