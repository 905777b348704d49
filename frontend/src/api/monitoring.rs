//! Monitoring snapshot and the live push channel.

use common::endpoints;
use common::error::ApiResult;
use common::model::monitoring::{ConnectorStatus, MonitoringData, PerformanceMetrics};
use futures_util::future::{abortable, try_join, AbortHandle};
use futures_util::StreamExt;
use gloo_net::websocket::futures::WebSocket;
use gloo_net::websocket::Message;
use yew::platform::spawn_local;
use yew::Callback;

use super::{ApiClient, Backend};

pub async fn snapshot(api: &ApiClient) -> ApiResult<MonitoringData> {
    let statuses = api.get::<Vec<ConnectorStatus>>(Backend::General, endpoints::MONITORING_STATUS);
    let metrics =
        api.get::<Vec<PerformanceMetrics>>(Backend::General, endpoints::MONITORING_METRICS);
    let (connector_statuses, performance_metrics) = try_join(statuses, metrics).await?;
    Ok(MonitoringData {
        connector_statuses,
        performance_metrics,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Frame(MonitoringData),
    /// The socket errored or closed; the attempt is over.
    Failed(String),
}

/// Runs one connection attempt. Aborting the returned handle drops the
/// socket, which closes it.
pub fn open_channel(url: String, on_event: Callback<ChannelEvent>) -> AbortHandle {
    let (task, handle) = abortable(run_channel(url, on_event));
    spawn_local(async move {
        let _ = task.await;
    });
    handle
}

async fn run_channel(url: String, on_event: Callback<ChannelEvent>) {
    let mut socket = match WebSocket::open(&url) {
        Ok(socket) => socket,
        Err(err) => {
            on_event.emit(ChannelEvent::Failed(err.to_string()));
            return;
        }
    };

    while let Some(message) = socket.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<MonitoringData>(&text) {
                Ok(data) => on_event.emit(ChannelEvent::Frame(data)),
                Err(err) => gloo_console::warn!(format!("Ignoring monitoring frame: {}", err)),
            },
            Ok(Message::Bytes(_)) => {}
            Err(err) => {
                on_event.emit(ChannelEvent::Failed(err.to_string()));
                return;
            }
        }
    }
    on_event.emit(ChannelEvent::Failed("connection closed".to_string()));
}
