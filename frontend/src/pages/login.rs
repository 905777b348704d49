use common::requests::LoginRequest;
use common::validation::{FieldErrors, Validate};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::components::form::text_input;
use crate::components::secure_field::SecureField;
use crate::context::auth::AuthContext;
use crate::context::subscribe;

pub enum Msg {
    AuthChanged(AuthContext),
    Username(String),
    Password(String),
    Submit,
}

pub struct LoginPage {
    request: LoginRequest,
    errors: FieldErrors,
    auth: Option<AuthContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (auth, handle) = subscribe(ctx.link(), ctx.link().callback(Msg::AuthChanged));
        Self {
            request: LoginRequest::default(),
            errors: FieldErrors::new(),
            auth,
            _auth_handle: handle,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => self.auth = Some(auth),
            Msg::Username(username) => self.request.username = username,
            Msg::Password(password) => self.request.password = password,
            Msg::Submit => match self.request.validate() {
                Err(errors) => self.errors = errors,
                Ok(()) => {
                    self.errors = FieldErrors::new();
                    if let Some(auth) = &self.auth {
                        auth.login.emit(self.request.clone());
                    }
                }
            },
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let busy = self.auth.as_ref().is_some_and(|a| a.busy);
        let error = self.auth.as_ref().and_then(|a| a.error.clone());
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        html! {
            <div class="login-page">
                <form class="card login-card" {onsubmit} novalidate=true>
                    <div class="card-title">
                        <i class="material-icons">{"hub"}</i>
                        <h2>{"Middleware Console"}</h2>
                    </div>
                    if let Some(error) = error {
                        <div class="error-banner" role="alert">
                            <i class="material-icons">{"error_outline"}</i>
                            <span>{ error }</span>
                        </div>
                    }
                    { text_input("username", "Username", &self.request.username, self.errors.get("username"),
                        link.callback(Msg::Username)) }
                    <SecureField id="password" label="Password" value={self.request.password.clone()}
                        error={self.errors.get("password").map(|e| AttrValue::from(e.to_string()))}
                        on_change={link.callback(Msg::Password)} />
                    <button class="btn primary" type="submit" disabled={busy}>
                        { if busy { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
            </div>
        }
    }
}
