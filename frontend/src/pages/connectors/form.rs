//! Create/edit form shared by every connector kind.
//!
//! The form binds new records to the selected client and interface on save,
//! tracks unsaved edits with an md5 fingerprint of the serialized record, and
//! can test the connection with the unsaved values.

use std::marker::PhantomData;

use common::error::ApiResult;
use common::model::client::EntityRef;
use common::model::connector::TestConnectionResult;
use common::resource::{Operation, OperationFlags, RequestId};
use common::validation::FieldErrors;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{report, ConnectorPage};
use crate::api::connectors::ConnectorService;
use crate::components::form::{compute_md5, error_banner, icon_button, spinner};
use crate::components::toast::{show_toast, Severity};
use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;
use crate::context::subscribe;
use crate::router;

pub enum Msg<K> {
    AuthChanged(AuthContext),
    SelectionChanged(SelectionContext),
    Loaded(RequestId, ApiResult<K>),
    Edit(K),
    Save,
    Saved(Operation, RequestId, ApiResult<K>),
    Test,
    Tested(RequestId, ApiResult<TestConnectionResult>),
    Cancel,
    Dismiss(Operation),
}

#[derive(Properties, PartialEq)]
pub struct ConnectorFormProps {
    /// `None` creates a new record.
    #[prop_or_default]
    pub id: Option<i64>,
}

pub struct ConnectorForm<K: ConnectorPage> {
    config: K,
    baseline: String,
    errors: FieldErrors,
    flags: OperationFlags,
    test_result: Option<TestConnectionResult>,
    auth: Option<AuthContext>,
    selection: Option<SelectionContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    _selection_handle: Option<ContextHandle<SelectionContext>>,
    kind: PhantomData<K>,
}

fn fingerprint<K: ConnectorPage>(config: &K) -> String {
    compute_md5(&serde_json::to_string(config).unwrap_or_default())
}

impl<K: ConnectorPage> ConnectorForm<K> {
    fn service(&self) -> Option<ConnectorService<K>> {
        self.auth.as_ref().map(|auth| ConnectorService::new(&auth.api))
    }

    fn is_dirty(&self) -> bool {
        fingerprint(&self.config) != self.baseline
    }

    fn reset_to(&mut self, config: K) {
        self.baseline = fingerprint(&config);
        self.config = config;
        self.errors = FieldErrors::new();
        self.test_result = None;
    }

    fn load(&mut self, ctx: &Context<Self>) {
        let Some(id) = ctx.props().id else {
            self.reset_to(K::default());
            return;
        };
        let Some(service) = self.service() else {
            return;
        };
        let request = self.flags.begin(Operation::FetchOne);
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = service.fetch_one(id).await;
            link.send_message(Msg::Loaded(request, result));
        });
    }

    /// Client and interface a new record gets bound to.
    fn target_scope(&self) -> Option<(EntityRef, EntityRef)> {
        let (client, interface) = self.selection.as_ref()?.state.scope()?;
        Some((
            EntityRef::named(client.id, client.name.clone()),
            EntityRef::named(interface.id, interface.name.clone()),
        ))
    }

    fn validated(&mut self) -> bool {
        match self.config.validate() {
            Ok(()) => {
                self.errors = FieldErrors::new();
                true
            }
            Err(errors) => {
                self.errors = errors;
                show_toast("Please correct the highlighted fields", Severity::Error);
                false
            }
        }
    }

    fn binding_label(&self) -> String {
        let named = |r: &EntityRef| r.name.clone().unwrap_or_else(|| format!("#{}", r.id));
        match (self.config.client(), self.config.interface()) {
            (Some(client), Some(interface)) => format!("{} / {}", named(client), named(interface)),
            _ => match self.target_scope() {
                Some((client, interface)) => {
                    format!("{} / {} (on save)", named(&client), named(&interface))
                }
                None => "Select a client and an interface".to_string(),
            },
        }
    }
}

impl<K: ConnectorPage> Component for ConnectorForm<K> {
    type Message = Msg<K>;
    type Properties = ConnectorFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let (selection, selection_handle) = subscribe(link, link.callback(Msg::SelectionChanged));
        let config = K::default();
        let mut form = Self {
            baseline: fingerprint(&config),
            config,
            errors: FieldErrors::new(),
            flags: OperationFlags::new(),
            test_result: None,
            auth,
            selection,
            _auth_handle: auth_handle,
            _selection_handle: selection_handle,
            kind: PhantomData,
        };
        form.load(ctx);
        form
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().id != old_props.id {
            self.load(ctx);
        }
        true
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
            Msg::Loaded(request, result) => match result {
                Ok(config) => {
                    if self.flags.succeed(Operation::FetchOne, request) {
                        self.reset_to(config);
                    }
                    true
                }
                Err(err) => {
                    report(self.auth.as_ref(), Operation::FetchOne.label(), &err);
                    self.flags.fail(Operation::FetchOne, request, &err)
                }
            },
            Msg::Edit(config) => {
                self.config = config;
                self.test_result = None;
                true
            }
            Msg::Save => {
                if !self.validated() {
                    return true;
                }
                let mut config = self.config.clone();
                if config.client().is_none() || config.interface().is_none() {
                    let Some((client, interface)) = self.target_scope() else {
                        show_toast("Select a client and an interface first", Severity::Error);
                        return false;
                    };
                    config.bind(client, interface);
                }
                let Some(service) = self.service() else {
                    return false;
                };
                let op = if config.id().is_some() { Operation::Update } else { Operation::Create };
                let request = self.flags.begin(op);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = match config.id() {
                        Some(id) => service.update(id, &config).await,
                        None => service.create(&config).await,
                    };
                    link.send_message(Msg::Saved(op, request, result));
                });
                true
            }
            Msg::Saved(op, request, result) => match result {
                Ok(saved) => {
                    if !self.flags.succeed(op, request) {
                        return false;
                    }
                    show_toast(&format!("{} saved", K::TITLE), Severity::Success);
                    self.reset_to(saved);
                    if let Some(route) = K::list_route() {
                        router::navigate(route);
                    }
                    true
                }
                Err(err) => {
                    report(self.auth.as_ref(), op.label(), &err);
                    self.flags.fail(op, request, &err)
                }
            },
            Msg::Test => {
                if !self.validated() {
                    return true;
                }
                let Some(service) = self.service() else {
                    return false;
                };
                self.test_result = None;
                let config = self.config.clone();
                let request = self.flags.begin(Operation::TestConnection);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = service.test_connection(&config).await;
                    link.send_message(Msg::Tested(request, result));
                });
                true
            }
            Msg::Tested(request, result) => {
                if !self.flags.succeed(Operation::TestConnection, request) {
                    return false;
                }
                self.test_result = Some(match result {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        report(self.auth.as_ref(), Operation::TestConnection.label(), &err);
                        TestConnectionResult::failed(err.to_string())
                    }
                });
                true
            }
            Msg::Cancel => {
                match K::list_route() {
                    Some(route) => router::navigate(route),
                    None => self.load(ctx),
                }
                true
            }
            Msg::Dismiss(op) => {
                self.flags.dismiss(op);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let editing = self.config.id().is_some() || ctx.props().id.is_some();
        let saving =
            self.flags.is_loading(Operation::Create) || self.flags.is_loading(Operation::Update);
        let testing = self.flags.is_loading(Operation::TestConnection);
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Save
        });

        html! {
            <div class="page">
                <div class="page-header">
                    <h2>
                        { if editing { format!("Edit {}", K::NOUN) } else { format!("New {}", K::NOUN) } }
                        if self.is_dirty() {
                            <span class="dirty-dot" title="Unsaved changes">{"●"}</span>
                        }
                    </h2>
                    <span class="muted">{ self.binding_label() }</span>
                </div>
                { for self.flags.errors().map(|(op, message)| error_banner(
                    &format!("Failed to {}: {}", op.label(), message),
                    link.callback(move |_| Msg::Dismiss(op)),
                )) }
                if self.flags.is_loading(Operation::FetchOne) {
                    { spinner() }
                } else {
                    <form class="config-form" {onsubmit} novalidate=true>
                        { self.config.fields(&self.errors, link.callback(Msg::Edit)) }
                    </form>
                }
                if let Some(result) = &self.test_result {
                    <div class={classes!("test-result", if result.success { "success" } else { "failure" })}>
                        <i class="material-icons">{ if result.success { "check_circle" } else { "error" } }</i>
                        <span>{ result.message.clone() }</span>
                    </div>
                }
                <div class="form-actions">
                    { icon_button("network_check", if testing { "Testing..." } else { "Test connection" }, link.callback(|_| Msg::Test), testing) }
                    { icon_button("close", "Cancel", link.callback(|_| Msg::Cancel), saving) }
                    { icon_button("save", if saving { "Saving..." } else { "Save" }, link.callback(|_| Msg::Save), saving) }
                </div>
            </div>
        }
    }
}
