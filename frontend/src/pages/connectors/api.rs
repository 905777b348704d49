//! API connector: one configuration per client and interface, edited in
//! place rather than picked from a list.

use std::collections::BTreeMap;

use common::error::ApiResult;
use common::model::connector::{ApiConfig, ConnectorConfig};
use common::resource::{Operation, OperationFlags, RequestId};
use common::route::Route;
use common::validation::FieldErrors;
use web_sys::HtmlInputElement;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::form::ConnectorForm;
use super::{edit, report, ConnectorPage};
use crate::api::connectors::ConnectorService;
use crate::components::form::{
    checkbox, empty_state, error_banner, number_input, row_action, spinner, text_input,
};
use crate::components::secure_field::SecureField;
use crate::components::selector::ClientInterfaceSelector;
use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;
use crate::context::subscribe;

impl ConnectorPage for ApiConfig {
    const TITLE: &'static str = "API Configuration";
    const NOUN: &'static str = "API configuration";

    fn list_route() -> Option<Route> {
        None
    }

    fn new_route() -> Option<Route> {
        None
    }

    fn edit_route(_id: i64) -> Option<Route> {
        None
    }

    fn fields(&self, errors: &FieldErrors, on_change: Callback<Self>) -> Html {
        html! {
            <>
                <fieldset>
                    <legend>{"Endpoint"}</legend>
                    { text_input("baseUrl", "Base URL", &self.base_url, errors.get("baseUrl"),
                        edit(self, &on_change, |c: &mut ApiConfig, v| c.base_url = v)) }
                    { text_input("username", "Username", &self.username, errors.get("username"),
                        edit(self, &on_change, |c: &mut ApiConfig, v| c.username = v)) }
                    <SecureField id="password" label="Password" value={self.password.clone()}
                        error={errors.get("password").map(|e| AttrValue::from(e.to_string()))}
                        on_change={edit(self, &on_change, |c: &mut ApiConfig, v| c.password = v)} />
                </fieldset>
                <fieldset>
                    <legend>{"Retries"}</legend>
                    { number_input("timeout", "Timeout (ms)", self.timeout, errors.get("timeout"),
                        edit(self, &on_change, |c: &mut ApiConfig, v| c.timeout = v)) }
                    { number_input("retryAttempts", "Retry attempts", self.retry_attempts, errors.get("retryAttempts"),
                        edit(self, &on_change, |c: &mut ApiConfig, v| c.retry_attempts = v)) }
                    { number_input("retryDelay", "Retry delay (ms)", self.retry_delay, errors.get("retryDelay"),
                        edit(self, &on_change, |c: &mut ApiConfig, v| c.retry_delay = v)) }
                    { checkbox("active", "Active", self.active,
                        edit(self, &on_change, |c: &mut ApiConfig, v| c.active = v)) }
                </fieldset>
                <fieldset>
                    <legend>{"Headers"}</legend>
                    <HeaderEditor headers={self.headers.clone()}
                        error={errors.get("headers").map(|e| AttrValue::from(e.to_string()))}
                        on_change={edit(self, &on_change, |c: &mut ApiConfig, v| c.headers = v)} />
                </fieldset>
            </>
        }
    }
}

pub enum HeaderMsg {
    Name(String),
    Value(String),
    Add,
    Remove(String),
}

#[derive(Properties, PartialEq)]
pub struct HeaderEditorProps {
    pub headers: BTreeMap<String, String>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_change: Callback<BTreeMap<String, String>>,
}

pub struct HeaderEditor {
    name: String,
    value: String,
}

impl Component for HeaderEditor {
    type Message = HeaderMsg;
    type Properties = HeaderEditorProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            name: String::new(),
            value: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            HeaderMsg::Name(name) => self.name = name,
            HeaderMsg::Value(value) => self.value = value,
            HeaderMsg::Add => {
                let name = self.name.trim();
                if name.is_empty() {
                    return false;
                }
                let mut headers = props.headers.clone();
                headers.insert(name.to_string(), self.value.clone());
                self.name.clear();
                self.value.clear();
                props.on_change.emit(headers);
            }
            HeaderMsg::Remove(name) => {
                let mut headers = props.headers.clone();
                if headers.remove(&name).is_some() {
                    props.on_change.emit(headers);
                }
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        html! {
            <div class={classes!("form-field", "header-editor", props.error.as_ref().map(|_| "invalid"))}>
                <ul>
                    { for props.headers.iter().map(|(name, value)| {
                        let key = name.clone();
                        html! {
                            <li>
                                <code>{ format!("{}: {}", name, value) }</code>
                                { row_action("delete", "Remove header", link.callback(move |_| HeaderMsg::Remove(key.clone()))) }
                            </li>
                        }
                    }) }
                </ul>
                <div class="inline-add">
                    <input type="text" placeholder="Header" value={self.name.clone()}
                        oninput={link.callback(|e: InputEvent| HeaderMsg::Name(e.target_unchecked_into::<HtmlInputElement>().value()))} />
                    <input type="text" placeholder="Value" value={self.value.clone()}
                        oninput={link.callback(|e: InputEvent| HeaderMsg::Value(e.target_unchecked_into::<HtmlInputElement>().value()))} />
                    <button type="button" class="btn" onclick={link.callback(|_| HeaderMsg::Add)}>{"Add"}</button>
                </div>
                if let Some(error) = &props.error {
                    <span class="field-error">{ error.clone() }</span>
                }
            </div>
        }
    }
}

pub enum Msg {
    AuthChanged(AuthContext),
    SelectionChanged(SelectionContext),
    Resolved(RequestId, i64, ApiResult<Vec<ApiConfig>>),
    Dismiss,
}

/// Finds the record of the selected interface, then hands it to the form.
pub struct ApiConfigPage {
    flags: OperationFlags,
    request: Option<RequestId>,
    interface_id: Option<i64>,
    existing: Option<i64>,
    auth: Option<AuthContext>,
    selection: Option<SelectionContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    _selection_handle: Option<ContextHandle<SelectionContext>>,
}

impl ApiConfigPage {
    fn selected_interface(&self) -> Option<i64> {
        self.selection.as_ref()?.state.scope().map(|(_, i)| i.id)
    }

    fn resolve(&mut self, ctx: &Context<Self>) {
        self.interface_id = self.selected_interface();
        self.existing = None;
        self.request = None;
        let (Some(interface_id), Some(auth)) = (self.interface_id, &self.auth) else {
            return;
        };
        let service = ConnectorService::<ApiConfig>::new(&auth.api);
        let request = self.flags.begin(Operation::FetchByInterface);
        self.request = Some(request);
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = service.fetch_by_interface(interface_id).await;
            link.send_message(Msg::Resolved(request, interface_id, result));
        });
    }
}

impl Component for ApiConfigPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let (selection, selection_handle) = subscribe(link, link.callback(Msg::SelectionChanged));
        let mut page = Self {
            flags: OperationFlags::new(),
            request: None,
            interface_id: None,
            existing: None,
            auth,
            selection,
            _auth_handle: auth_handle,
            _selection_handle: selection_handle,
        };
        page.resolve(ctx);
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
                if self.selected_interface() != self.interface_id {
                    self.resolve(ctx);
                }
                true
            }
            Msg::Resolved(request, interface_id, result) => {
                if self.request != Some(request) || self.interface_id != Some(interface_id) {
                    return false;
                }
                self.request = None;
                match result {
                    Ok(configs) => {
                        self.flags.succeed(Operation::FetchByInterface, request);
                        self.existing = configs.iter().find_map(|c| c.id());
                    }
                    Err(err) => {
                        report(self.auth.as_ref(), Operation::FetchByInterface.label(), &err);
                        self.flags.fail(Operation::FetchByInterface, request, &err);
                    }
                }
                true
            }
            Msg::Dismiss => {
                self.flags.dismiss(Operation::FetchByInterface);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match self.interface_id {
            None => empty_state(
                "api",
                "Select a client and an interface to configure its API connector",
            ),
            Some(_) if self.request.is_some() => spinner(),
            Some(interface_id) => match self.flags.error(Operation::FetchByInterface) {
                Some(message) => error_banner(
                    &format!("Failed to {}: {}", Operation::FetchByInterface.label(), message),
                    ctx.link().callback(|_| Msg::Dismiss),
                ),
                None => html! {
                    <ConnectorForm<ApiConfig> key={interface_id.to_string()} id={self.existing} />
                },
            },
        };
        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{ ApiConfig::TITLE }</h2>
                </div>
                <ClientInterfaceSelector />
                { body }
            </div>
        }
    }
}
