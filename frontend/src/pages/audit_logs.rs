//! Paged audit trail. The text filter applies to the page on screen only.

use common::error::ApiResult;
use common::model::page::Page;
use common::model::user::AuditLog;
use common::requests::{PageQuery, SortDirection};
use common::resource::{RequestId, Resource};
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::form::{empty_state, error_banner, icon_button, search_box, spinner};
use crate::components::toast::report_error;
use crate::context::auth::AuthContext;
use crate::context::subscribe;

const PAGE_SIZE: u32 = 20;

pub enum Msg {
    AuthChanged(AuthContext),
    Load(u32),
    Loaded(RequestId, ApiResult<Page<AuditLog>>),
    Filter(String),
    DismissError,
}

pub struct AuditLogsPage {
    logs: Resource<Page<AuditLog>>,
    page_number: u32,
    filter: String,
    auth: Option<AuthContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
}

impl AuditLogsPage {
    fn load(&mut self, ctx: &Context<Self>, page_number: u32) {
        let Some(api) = self.auth.as_ref().map(|a| a.api.clone()) else {
            return;
        };
        self.page_number = page_number;
        let request = self.logs.start();
        let query = PageQuery::sorted_by("createdAt", SortDirection::Desc)
            .with_page(page_number, PAGE_SIZE);
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::admin::audit_logs(&api, &query).await;
            link.send_message(Msg::Loaded(request, result));
        });
    }

    fn view_page(&self, ctx: &Context<Self>, page: &Page<AuditLog>) -> Html {
        let link = ctx.link();
        let visible: Vec<&AuditLog> =
            page.content.iter().filter(|log| log.matches(&self.filter)).collect();
        let rows = if visible.is_empty() {
            html! {
                <tr><td colspan="6" class="muted">{"No entry on this page matches the filter"}</td></tr>
            }
        } else {
            html! {
                { for visible.into_iter().map(|log| html! {
                    <tr key={log.id.to_string()} class={classes!(log.error_message.is_some().then_some("alert-row"))}>
                        <td>{ log.created_at.clone() }</td>
                        <td>{ log.username.clone() }</td>
                        <td><code>{ log.action.clone() }</code></td>
                        <td>
                            { log.details.clone() }
                            if let Some(error) = &log.error_message {
                                <div class="field-error">{ error.clone() }</div>
                            }
                        </td>
                        <td>
                            { match (&log.request_method, &log.request_url) {
                                (Some(method), Some(url)) => format!("{} {}", method, url),
                                (None, Some(url)) => url.clone(),
                                _ => String::new(),
                            } }
                            if let Some(status) = log.response_status {
                                <span class="muted">{ format!(" ({})", status) }</span>
                            }
                        </td>
                        <td class="numeric">{ log.execution_time.map(|ms| format!("{} ms", ms)).unwrap_or_default() }</td>
                    </tr>
                }) }
            }
        };
        html! {
            <>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"When"}</th>
                            <th>{"User"}</th>
                            <th>{"Action"}</th>
                            <th>{"Details"}</th>
                            <th>{"Request"}</th>
                            <th class="numeric">{"Time"}</th>
                        </tr>
                    </thead>
                    <tbody>{ rows }</tbody>
                </table>
                <div class="pager">
                    { icon_button("chevron_left", "Previous", link.callback({
                        let n = self.page_number;
                        move |_| Msg::Load(n.saturating_sub(1))
                    }), page.first) }
                    <span>{ format!("Page {} of {} ({} entries)", page.number + 1, page.total_pages.max(1), page.total_elements) }</span>
                    { icon_button("chevron_right", "Next", link.callback({
                        let n = self.page_number;
                        move |_| Msg::Load(n + 1)
                    }), page.last) }
                </div>
            </>
        }
    }
}

impl Component for AuditLogsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let mut page = Self {
            logs: Resource::default(),
            page_number: 0,
            filter: String::new(),
            auth,
            _auth_handle: auth_handle,
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
            Msg::Load(page_number) => {
                self.load(ctx, page_number);
                true
            }
            Msg::Loaded(request, result) => {
                if let (Err(err), true) = (&result, self.logs.is_pending(request)) {
                    let expire = self
                        .auth
                        .as_ref()
                        .map(|a| a.expire.clone())
                        .unwrap_or_else(Callback::noop);
                    report_error("load audit logs", err, &expire);
                }
                self.logs.complete(request, result)
            }
            Msg::Filter(term) => {
                self.filter = term;
                true
            }
            Msg::DismissError => {
                self.logs.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let body = match &self.logs {
            Resource::Loading { .. } => spinner(),
            Resource::Failure(message) => {
                error_banner(message, link.callback(|_| Msg::DismissError))
            }
            Resource::Success(page) if page.content.is_empty() => {
                empty_state("history", "The audit log is empty")
            }
            Resource::Success(page) => self.view_page(ctx, page),
            Resource::Idle => html! {},
        };
        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{"Audit logs"}</h2>
                    <div class="toolbar">
                        { search_box("Filter this page", &self.filter, link.callback(Msg::Filter)) }
                        { icon_button("refresh", "Refresh", link.callback({
                            let n = self.page_number;
                            move |_| Msg::Load(n)
                        }), self.logs.is_loading()) }
                    </div>
                </div>
                { body }
            </div>
        }
    }
}
