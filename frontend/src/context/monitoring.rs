//! Live connector health. Mounted by the monitoring page only, so the push
//! channel lives exactly as long as the dashboard.

use std::rc::Rc;

use common::backoff::{ChannelState, Reconnector};
use common::error::ApiResult;
use common::model::monitoring::MonitoringData;
use common::resource::{RequestId, Resource};
use futures_util::future::{abortable, AbortHandle};
use gloo_timers::future::TimeoutFuture;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::auth::AuthContext;
use super::subscribe;
use crate::api::monitoring::{self, ChannelEvent};

#[derive(Clone, PartialEq)]
pub struct MonitoringContext {
    pub data: Rc<MonitoringData>,
    pub loading: bool,
    pub error: Option<String>,
    pub channel: ChannelState,
    pub failures: u32,
    pub refresh: Callback<()>,
    /// Restarts the push channel after retries were exhausted.
    pub reconnect: Callback<()>,
    pub dismiss_error: Callback<()>,
}

pub enum Msg {
    AuthChanged(AuthContext),
    Refresh,
    SnapshotLoaded(RequestId, ApiResult<MonitoringData>),
    Channel(ChannelEvent),
    Retry,
    Reconnect,
    DismissError,
}

#[derive(Properties, PartialEq)]
pub struct MonitoringProviderProps {
    #[prop_or_default]
    pub children: Html,
}

pub struct MonitoringProvider {
    data: Rc<MonitoringData>,
    snapshot: Resource<()>,
    live: bool,
    reconnector: Reconnector,
    channel: Option<AbortHandle>,
    retry_timer: Option<AbortHandle>,
    auth: Option<AuthContext>,
    _auth_handle: Option<ContextHandle<AuthContext>>,
    refresh: Callback<()>,
    reconnect: Callback<()>,
    dismiss_error: Callback<()>,
}

impl MonitoringProvider {
    fn fetch_snapshot(&mut self, ctx: &Context<Self>) {
        let Some(auth) = &self.auth else {
            return;
        };
        let request = self.snapshot.start();
        let api = auth.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = monitoring::snapshot(&api).await;
            link.send_message(Msg::SnapshotLoaded(request, result));
        });
    }

    fn open_channel(&mut self, ctx: &Context<Self>) {
        let Some(auth) = &self.auth else {
            return;
        };
        if let Some(previous) = self.channel.take() {
            previous.abort();
        }
        let url = auth.api.config().monitoring_channel();
        gloo_console::log!(format!("Opening monitoring channel {}", url));
        self.channel = Some(monitoring::open_channel(url, ctx.link().callback(Msg::Channel)));
    }

    fn schedule_retry(&mut self, ctx: &Context<Self>, delay_ms: u32) {
        let (timer, handle) = abortable(TimeoutFuture::new(delay_ms));
        let link = ctx.link().clone();
        spawn_local(async move {
            if timer.await.is_ok() {
                link.send_message(Msg::Retry);
            }
        });
        self.retry_timer = Some(handle);
    }

    fn stop(&mut self) {
        if let Some(timer) = self.retry_timer.take() {
            timer.abort();
        }
        if let Some(channel) = self.channel.take() {
            channel.abort();
        }
    }
}

impl Component for MonitoringProvider {
    type Message = Msg;
    type Properties = MonitoringProviderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (auth, handle) = subscribe(link, link.callback(Msg::AuthChanged));
        let policy = auth
            .as_ref()
            .map(|a| a.api.config().reconnect.clone())
            .unwrap_or_default();

        let mut provider = Self {
            data: Rc::new(MonitoringData::default()),
            snapshot: Resource::default(),
            live: false,
            reconnector: Reconnector::new(policy),
            channel: None,
            retry_timer: None,
            auth,
            _auth_handle: handle,
            refresh: link.callback(|_| Msg::Refresh),
            reconnect: link.callback(|_| Msg::Reconnect),
            dismiss_error: link.callback(|_| Msg::DismissError),
        };
        provider.fetch_snapshot(ctx);
        provider.open_channel(ctx);
        provider
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AuthChanged(auth) => {
                let signed_out = !auth.state.is_authenticated();
                self.auth = Some(auth);
                if signed_out {
                    self.stop();
                    self.reconnector.close();
                }
                true
            }
            Msg::Refresh => {
                self.fetch_snapshot(ctx);
                true
            }
            Msg::SnapshotLoaded(request, result) => {
                if let Err(err) = &result {
                    gloo_console::error!(format!("Failed to load monitoring data: {}", err));
                    if err.is_session_invalid() {
                        if let Some(auth) = &self.auth {
                            auth.expire.emit(());
                        }
                    }
                }
                let data = result.as_ref().ok().cloned();
                if !self.snapshot.complete(request, result.map(|_| ())) {
                    return false;
                }
                // A pushed frame is newer than any snapshot.
                if let (Some(data), false) = (data, self.live) {
                    self.data = Rc::new(data);
                }
                true
            }
            Msg::Channel(ChannelEvent::Frame(data)) => {
                self.reconnector.on_frame();
                self.live = true;
                self.data = Rc::new(data);
                true
            }
            Msg::Channel(ChannelEvent::Failed(reason)) => {
                self.channel = None;
                gloo_console::warn!(format!("Monitoring channel failed: {}", reason));
                match self.reconnector.on_failure() {
                    Some(delay_ms) => self.schedule_retry(ctx, delay_ms),
                    None if self.reconnector.is_exhausted() => {
                        gloo_console::error!(format!(
                            "Monitoring channel gave up after {} attempts",
                            self.reconnector.failures() - 1
                        ));
                    }
                    None => {}
                }
                true
            }
            Msg::Retry => {
                self.retry_timer = None;
                self.reconnector.on_attempt();
                self.open_channel(ctx);
                true
            }
            Msg::Reconnect => {
                self.stop();
                self.reconnector.reset();
                self.open_channel(ctx);
                true
            }
            Msg::DismissError => {
                if self.snapshot.error().is_some() {
                    self.snapshot.reset();
                    return true;
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let context = MonitoringContext {
            data: self.data.clone(),
            loading: self.snapshot.is_loading(),
            error: self.snapshot.error().map(str::to_string),
            channel: self.reconnector.state(),
            failures: self.reconnector.failures(),
            refresh: self.refresh.clone(),
            reconnect: self.reconnect.clone(),
            dismiss_error: self.dismiss_error.clone(),
        };
        html! {
            <ContextProvider<MonitoringContext> {context}>
                { ctx.props().children.clone() }
            </ContextProvider<MonitoringContext>>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.stop();
        self.reconnector.close();
    }
}
