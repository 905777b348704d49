//! Root of the console: fetches the runtime configuration, mounts the
//! session and selection providers, and renders the routed shell.

use common::config::ConsoleConfig;
use common::error::ApiResult;
use common::model::connector::{As2Config, SftpConfig};
use common::route::Route;
use common::session::AuthState;
use gloo_console::error;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiClient};
use crate::components::form::{empty_state, spinner};
use crate::components::navigation::{SideNav, TopBar};
use crate::context::auth::{AuthContext, AuthProvider};
use crate::context::selection::SelectionProvider;
use crate::context::subscribe;
use crate::pages::audit_logs::AuditLogsPage;
use crate::pages::clients::ClientsPage;
use crate::pages::connectors::api::ApiConfigPage;
use crate::pages::connectors::form::ConnectorForm;
use crate::pages::connectors::list::ConnectorList;
use crate::pages::home::HomePage;
use crate::pages::interfaces::InterfacesPage;
use crate::pages::login::LoginPage;
use crate::pages::monitoring::MonitoringPage;
use crate::pages::transform::TransformPage;
use crate::pages::users::UsersPage;
use crate::router::{self, current_route, RouteListener};

pub enum AppMsg {
    ConfigLoaded(ApiResult<ConsoleConfig>),
}

pub enum App {
    Starting,
    Ready(ApiClient),
    Failed(String),
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(AppMsg::ConfigLoaded(api::load_console_config().await));
        });
        App::Starting
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::ConfigLoaded(Ok(config)) => *self = App::Ready(ApiClient::new(config)),
            AppMsg::ConfigLoaded(Err(err)) => {
                error!(format!("Console configuration unavailable: {}", err));
                *self = App::Failed(err.to_string());
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match self {
            App::Starting => html! { <div class="boot">{ spinner() }</div> },
            App::Failed(message) => html! {
                <div class="boot">
                    { empty_state("cloud_off", "The console could not load its configuration") }
                    <p class="muted">{ message.clone() }</p>
                </div>
            },
            App::Ready(api) => html! {
                <AuthProvider api={api.clone()}>
                    <SelectionProvider>
                        <Shell />
                    </SelectionProvider>
                </AuthProvider>
            },
        }
    }
}

pub enum ShellMsg {
    Auth(AuthContext),
    RouteChanged(Route),
}

/// Navigation chrome plus the page for the current route, gated by session
/// and role.
pub struct Shell {
    route: Route,
    auth: Option<AuthContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    _listener: RouteListener,
}

impl Shell {
    /// Sends anonymous visitors to the login page and signed-in users away
    /// from it.
    fn enforce_session(&self) {
        let Some(auth) = &self.auth else {
            return;
        };
        match &auth.state {
            AuthState::Anonymous if self.route.requires_auth() => router::navigate(Route::Login),
            AuthState::Authenticated(_) if self.route == Route::Login => {
                router::navigate(Route::Home)
            }
            _ => {}
        }
    }

    fn page(&self, auth: &AuthContext) -> Html {
        if let Some(role) = self.route.required_role() {
            if !auth.state.has_role(role) {
                return empty_state("lock", "You do not have access to this page");
            }
        }
        match self.route {
            Route::Home => html! { <HomePage /> },
            Route::ApiConfig => html! { <ApiConfigPage /> },
            Route::SftpList => html! { <ConnectorList<SftpConfig> /> },
            Route::SftpNew => html! { <ConnectorForm<SftpConfig> key="new" /> },
            Route::SftpEdit(id) => {
                html! { <ConnectorForm<SftpConfig> key={id.to_string()} id={Some(id)} /> }
            }
            Route::As2List => html! { <ConnectorList<As2Config> /> },
            Route::As2New => html! { <ConnectorForm<As2Config> key="new" /> },
            Route::As2Edit(id) => {
                html! { <ConnectorForm<As2Config> key={id.to_string()} id={Some(id)} /> }
            }
            Route::Monitoring => html! { <MonitoringPage /> },
            Route::Clients => html! { <ClientsPage /> },
            Route::Interfaces => html! { <InterfacesPage /> },
            Route::Transform => html! { <TransformPage /> },
            Route::Users => html! { <UsersPage /> },
            Route::AuditLogs => html! { <AuditLogsPage /> },
            Route::Login => html! { <LoginPage /> },
            Route::NotFound => html! {
                <div class="page">
                    { empty_state("explore_off", "Page not found") }
                    <a class="btn" href={Route::Home.href()}>{"Back to home"}</a>
                </div>
            },
        }
    }
}

impl Component for Shell {
    type Message = ShellMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, auth_handle) = subscribe(link, link.callback(ShellMsg::Auth));
        let shell = Self {
            route: current_route(),
            auth,
            _auth_handle: auth_handle,
            _listener: RouteListener::new(link.callback(ShellMsg::RouteChanged)),
        };
        shell.enforce_session();
        shell
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ShellMsg::Auth(auth) => self.auth = Some(auth),
            ShellMsg::RouteChanged(route) => self.route = route,
        }
        self.enforce_session();
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(auth) = &self.auth else {
            return spinner();
        };
        let user = match &auth.state {
            AuthState::Checking => return html! { <div class="boot">{ spinner() }</div> },
            AuthState::Anonymous => return html! { <LoginPage /> },
            AuthState::Authenticated(user) => user,
        };
        if self.route == Route::Login {
            return spinner();
        }
        html! {
            <div class="shell">
                <SideNav current={self.route} auth={auth.state.clone()} />
                <div class="shell-main">
                    <TopBar
                        title={self.route.title()}
                        username={user.username.clone()}
                        on_logout={auth.logout.clone()}
                    />
                    <main class="content">{ self.page(auth) }</main>
                </div>
            </div>
        }
    }
}
