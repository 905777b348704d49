//! Transient notifications and the shared failure reporting path.

use common::error::ApiError;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::Callback;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn background(self) -> &'static str {
        match self {
            Severity::Info => "rgba(33, 33, 33, 0.9)",
            Severity::Success => "#2e7d32",
            Severity::Error => "#c62828",
        }
    }
}

/// Shows a message at the bottom of the screen for three seconds.
pub fn show_toast(message: &str, severity: Severity) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name("toast");
    let toast: HtmlElement = toast.unchecked_into();
    toast
        .style()
        .set_property("background", severity.background())
        .ok();

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        });
    }
}

/// Logs a failed operation and tells the operator. Session failures are
/// handed to `on_session_invalid` instead of being toasted.
pub fn report_error(action: &str, err: &ApiError, on_session_invalid: &Callback<()>) {
    gloo_console::error!(format!("Failed to {}: {}", action, err));
    if err.is_session_invalid() {
        on_session_invalid.emit(());
    } else {
        show_toast(&format!("Failed to {}: {}", action, err), Severity::Error);
    }
}
