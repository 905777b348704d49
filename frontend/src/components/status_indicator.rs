use common::backoff::ChannelState;
use common::model::monitoring::ConnectionState;
use yew::prelude::*;

pub fn status_chip(state: ConnectionState) -> Html {
    html! {
        <span class={classes!("status-chip", state.css_class())}>
            <i class="material-icons">{ state.icon() }</i>
            { state.label() }
        </span>
    }
}

pub fn active_chip(active: bool) -> Html {
    let (class, label) = if active {
        ("status-connected", "Active")
    } else {
        ("status-disconnected", "Inactive")
    };
    html! { <span class={classes!("status-chip", class)}>{label}</span> }
}

/// Badge describing the monitoring push channel.
pub fn channel_chip(state: ChannelState) -> Html {
    let (class, icon, label) = match state {
        ChannelState::Open => ("status-connected", "sensors", "Live".to_string()),
        ChannelState::Connecting => ("status-pending", "sync", "Connecting".to_string()),
        ChannelState::Waiting { attempt, delay_ms } => (
            "status-pending",
            "schedule",
            format!("Retry {} in {}s", attempt, delay_ms.div_ceil(1000)),
        ),
        ChannelState::Exhausted => {
            ("status-error", "sensors_off", "Live updates stopped".to_string())
        }
        ChannelState::Closed => ("status-disconnected", "sensors_off", "Closed".to_string()),
    };
    html! {
        <span class={classes!("status-chip", class)}>
            <i class="material-icons">{icon}</i>
            {label}
        </span>
    }
}
