//! Session state. Restores a stored token on start-up, signs in and out, and
//! ends the session when any call reports it invalid.

use common::error::{ApiError, ApiResult};
use common::requests::LoginRequest;
use common::route::Route;
use common::session::{discards_stored_token, AuthState, SessionUser, TOKEN_KEY};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiClient};
use crate::router;
use crate::storage;

#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub state: AuthState,
    pub busy: bool,
    pub error: Option<String>,
    pub api: ApiClient,
    pub login: Callback<LoginRequest>,
    pub logout: Callback<()>,
    /// Drops the session after a 401/403 and shows the login page.
    pub expire: Callback<()>,
}

impl AuthContext {
    pub fn user(&self) -> Option<&SessionUser> {
        self.state.user()
    }
}

pub enum Msg {
    Restored(ApiResult<SessionUser>),
    Login(LoginRequest),
    LoggedIn(ApiResult<SessionUser>),
    Logout,
    LoggedOut,
    Expire,
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub api: ApiClient,
    #[prop_or_default]
    pub children: Html,
}

pub struct AuthProvider {
    state: AuthState,
    busy: bool,
    error: Option<String>,
    login: Callback<LoginRequest>,
    logout: Callback<()>,
    expire: Callback<()>,
}

impl Component for AuthProvider {
    type Message = Msg;
    type Properties = AuthProviderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let api = ctx.props().api.clone();
        let restore_link = link.clone();
        spawn_local(async move {
            let result = api::auth::restore(&api).await;
            restore_link.send_message(Msg::Restored(result));
        });

        Self {
            state: AuthState::Checking,
            busy: false,
            error: None,
            login: link.callback(Msg::Login),
            logout: link.callback(|_| Msg::Logout),
            expire: link.callback(|_| Msg::Expire),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Restored(Ok(user)) => {
                gloo_console::log!(format!("Session restored for {}", user.username));
                self.state = AuthState::Authenticated(user);
                true
            }
            Msg::Restored(Err(err)) => {
                if discards_stored_token(&err) {
                    storage::remove(TOKEN_KEY);
                } else {
                    gloo_console::warn!(format!("Session check failed, token kept: {}", err));
                }
                self.state = AuthState::Anonymous;
                true
            }
            Msg::Login(request) => {
                if self.busy {
                    return false;
                }
                self.busy = true;
                self.error = None;
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::auth::login(&api, &request).await;
                    link.send_message(Msg::LoggedIn(result));
                });
                true
            }
            Msg::LoggedIn(result) => {
                self.busy = false;
                match result {
                    Ok(user) => {
                        gloo_console::log!(format!("Signed in as {}", user.username));
                        self.state = AuthState::Authenticated(user);
                        if router::current_route() == Route::Login {
                            router::navigate(Route::Home);
                        }
                    }
                    Err(err) => {
                        gloo_console::error!(format!("Failed to sign in: {}", err));
                        self.error = Some(match err {
                            ApiError::Unauthorized => "Invalid username or password".to_string(),
                            other => other.to_string(),
                        });
                    }
                }
                true
            }
            Msg::Logout => {
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    api::auth::logout(&api).await;
                    link.send_message(Msg::LoggedOut);
                });
                false
            }
            Msg::LoggedOut => {
                self.state = AuthState::Anonymous;
                router::navigate(Route::Login);
                true
            }
            Msg::Expire => {
                if !self.state.is_authenticated() {
                    return false;
                }
                gloo_console::warn!("Session is no longer valid");
                storage::remove(TOKEN_KEY);
                self.state = AuthState::Anonymous;
                router::navigate(Route::Login);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let context = AuthContext {
            state: self.state.clone(),
            busy: self.busy,
            error: self.error.clone(),
            api: ctx.props().api.clone(),
            login: self.login.clone(),
            logout: self.logout.clone(),
            expire: self.expire.clone(),
        };
        html! {
            <ContextProvider<AuthContext> {context}>
                { ctx.props().children.clone() }
            </ContextProvider<AuthContext>>
        }
    }
}
