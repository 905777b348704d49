//! Connector health dashboard. The provider, and with it the push channel,
//! only exists while this page is mounted.

use common::backoff::ChannelState;
use common::model::monitoring::{AlertConfig, ConnectionState, ConnectorStatus, MonitoringData};
use common::validation::{FieldErrors, Validate};
use num_format::{Locale, ToFormattedString};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::components::form::{
    checkbox, empty_state, error_banner, icon_button, number_input, spinner, text_input,
};
use crate::components::status_indicator::{channel_chip, status_chip};
use crate::components::toast::{show_toast, Severity};
use crate::components::top_sheet::TopSheet;
use crate::context::monitoring::{MonitoringContext, MonitoringProvider};
use crate::context::subscribe;

pub struct MonitoringPage;

impl Component for MonitoringPage {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <MonitoringProvider>
                <MonitoringDashboard />
            </MonitoringProvider>
        }
    }
}

fn count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

pub enum Msg {
    Monitoring(MonitoringContext),
    OpenAlerts,
    EditAlerts(AlertConfig),
    CloseAlerts,
    SaveAlerts,
}

struct AlertEditor {
    config: AlertConfig,
    errors: FieldErrors,
}

pub struct MonitoringDashboard {
    monitoring: Option<MonitoringContext>,
    _handle: Option<ContextHandle<MonitoringContext>>,
    /// Applied alert settings. They are not persisted anywhere.
    alerts: AlertConfig,
    alert_editor: Option<AlertEditor>,
}

impl MonitoringDashboard {
    fn view_summary(&self, data: &MonitoringData) -> Html {
        let connected = data
            .connector_statuses
            .iter()
            .filter(|s| s.status == ConnectionState::Connected)
            .count() as u64;
        let active: u64 = data
            .performance_metrics
            .iter()
            .map(|m| u64::from(m.active_connections))
            .sum();
        let card = |label: &str, value: String| {
            html! {
                <div class="metric-card">
                    <span class="metric-value">{ value }</span>
                    <span class="metric-label">{ label.to_string() }</span>
                </div>
            }
        };
        html! {
            <div class="metric-cards">
                { card("Connectors", count(data.connector_statuses.len() as u64)) }
                { card("Connected", count(connected)) }
                { card("Messages", count(data.total_messages())) }
                { card("Errors", count(data.total_errors())) }
                { card("Active connections", count(active)) }
            </div>
        }
    }

    fn view_row(&self, data: &MonitoringData, status: &ConnectorStatus) -> Html {
        let metrics = data.metrics_for(&status.id);
        let over_threshold = self.alerts.enabled
            && metrics.is_some_and(|m| {
                m.error_count >= u64::from(self.alerts.error_threshold)
                    || m.average_processing_time >= f64::from(self.alerts.processing_time_threshold)
            });
        html! {
            <tr key={status.id.clone()} class={classes!(over_threshold.then_some("alert-row"))}>
                <td>
                    { status.name.clone() }
                    if let Some(message) = &status.error_message {
                        <div class="field-error">{ message.clone() }</div>
                    }
                </td>
                <td>{ status.connector_type.to_string() }</td>
                <td>{ status_chip(status.status) }</td>
                <td>{ status.last_checked.clone() }</td>
                <td class="numeric">{ metrics.map(|m| count(m.message_count)).unwrap_or_else(|| "-".into()) }</td>
                <td class="numeric">{ metrics.map(|m| count(m.error_count)).unwrap_or_else(|| "-".into()) }</td>
                <td class="numeric">{ metrics.map(|m| format!("{:.0} ms", m.average_processing_time)).unwrap_or_else(|| "-".into()) }</td>
                <td class="numeric">{ metrics.map(|m| count(u64::from(m.active_connections))).unwrap_or_else(|| "-".into()) }</td>
            </tr>
        }
    }

    fn view_alert_editor(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_close = link.callback(|_| Msg::CloseAlerts);
        let Some(editor) = &self.alert_editor else {
            return html! { <TopSheet open={false} title="Alert configuration" {on_close} /> };
        };
        let config = &editor.config;
        let text = |apply: fn(&mut AlertConfig, String)| {
            let base = config.clone();
            link.callback(move |value: String| {
                let mut next = base.clone();
                apply(&mut next, value);
                Msg::EditAlerts(next)
            })
        };
        let number = |apply: fn(&mut AlertConfig, u32)| {
            let base = config.clone();
            link.callback(move |value: u32| {
                let mut next = base.clone();
                apply(&mut next, value);
                Msg::EditAlerts(next)
            })
        };
        let enabled = {
            let base = config.clone();
            link.callback(move |value: bool| {
                Msg::EditAlerts(AlertConfig {
                    enabled: value,
                    ..base.clone()
                })
            })
        };
        let actions = html! {
            <>
                <button class="btn" onclick={link.callback(|_| Msg::CloseAlerts)}>{"Cancel"}</button>
                <button class="btn primary" onclick={link.callback(|_| Msg::SaveAlerts)}>{"Apply"}</button>
            </>
        };
        html! {
            <TopSheet open={true} title="Alert configuration" {on_close} {actions}>
                { checkbox("alertsEnabled", "Highlight connectors over the thresholds", config.enabled, enabled) }
                { number_input("errorThreshold", "Error threshold", config.error_threshold, editor.errors.get("errorThreshold"),
                    number(|c, v| c.error_threshold = v)) }
                { number_input("processingTimeThreshold", "Processing time threshold (ms)", config.processing_time_threshold,
                    editor.errors.get("processingTimeThreshold"), number(|c, v| c.processing_time_threshold = v)) }
                { text_input("notificationEmail", "Notification email", &config.notification_email,
                    editor.errors.get("notificationEmail"), text(|c, v| c.notification_email = v)) }
                { text_input("notificationWebhook", "Notification webhook", &config.notification_webhook,
                    editor.errors.get("notificationWebhook"), text(|c, v| c.notification_webhook = v)) }
            </TopSheet>
        }
    }
}

impl Component for MonitoringDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();
        let (monitoring, handle) = subscribe(link, link.callback(Msg::Monitoring));
        Self {
            monitoring,
            _handle: handle,
            alerts: AlertConfig::default(),
            alert_editor: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Monitoring(monitoring) => {
                self.monitoring = Some(monitoring);
                true
            }
            Msg::OpenAlerts => {
                self.alert_editor = Some(AlertEditor {
                    config: self.alerts.clone(),
                    errors: FieldErrors::new(),
                });
                true
            }
            Msg::EditAlerts(config) => {
                if let Some(editor) = &mut self.alert_editor {
                    editor.config = config;
                }
                true
            }
            Msg::CloseAlerts => {
                self.alert_editor = None;
                true
            }
            Msg::SaveAlerts => {
                let Some(editor) = &mut self.alert_editor else {
                    return false;
                };
                match editor.config.validate() {
                    Ok(()) => {
                        self.alerts = editor.config.clone();
                        self.alert_editor = None;
                        show_toast("Alert configuration applied", Severity::Success);
                    }
                    Err(errors) => editor.errors = errors,
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(monitoring) = &self.monitoring else {
            return spinner();
        };
        let data = &monitoring.data;
        let refresh = monitoring.refresh.reform(|_: MouseEvent| ());
        let reconnect = monitoring.reconnect.reform(|_: MouseEvent| ());
        let dismiss = monitoring.dismiss_error.reform(|_: MouseEvent| ());

        let banner = match monitoring.channel {
            ChannelState::Exhausted => html! {
                <div class="banner warning">
                    <span class="material-icons">{"sync_problem"}</span>
                    <span>{ format!("Live updates stopped after {} failed attempts.", monitoring.failures) }</span>
                    { icon_button("sync", "Reconnect", reconnect, false) }
                </div>
            },
            _ => html! {},
        };
        let body = if monitoring.loading && data.connector_statuses.is_empty() {
            spinner()
        } else if data.connector_statuses.is_empty() {
            empty_state("monitor_heart", "No connector has reported its status yet")
        } else {
            html! {
                <>
                    { self.view_summary(data) }
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Connector"}</th>
                                <th>{"Type"}</th>
                                <th>{"Status"}</th>
                                <th>{"Last checked"}</th>
                                <th class="numeric">{"Messages"}</th>
                                <th class="numeric">{"Errors"}</th>
                                <th class="numeric">{"Avg. time"}</th>
                                <th class="numeric">{"Connections"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for data.connector_statuses.iter().map(|status| self.view_row(data, status)) }
                        </tbody>
                    </table>
                </>
            }
        };

        html! {
            <div class="page">
                <div class="page-header">
                    <h2>{"Monitoring"}</h2>
                    <div class="toolbar">
                        { channel_chip(monitoring.channel) }
                        { icon_button("notifications", "Alerts", link.callback(|_| Msg::OpenAlerts), false) }
                        { icon_button("refresh", "Refresh", refresh, monitoring.loading) }
                    </div>
                </div>
                { banner }
                if let Some(message) = &monitoring.error {
                    { error_banner(message, dismiss) }
                }
                { body }
                { self.view_alert_editor(ctx) }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::count;

    #[test]
    fn counters_use_thousands_separators() {
        assert_eq!(count(0), "0");
        assert_eq!(count(999), "999");
        assert_eq!(count(1_234_567), "1,234,567");
    }
}
