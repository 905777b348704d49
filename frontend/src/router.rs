//! Hash based navigation (`#/listener-config/sftp`).

use common::route::Route;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::Callback;

pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Route::parse(&hash))
        .unwrap_or(Route::Home)
}

pub fn navigate(route: Route) {
    if let Some(window) = web_sys::window() {
        if window.location().set_hash(&route.path()).is_err() {
            gloo_console::warn!(format!("Could not navigate to {}", route));
        }
    }
}

/// Keeps a `hashchange` listener registered until dropped.
pub struct RouteListener {
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl RouteListener {
    pub fn new(on_change: Callback<Route>) -> Self {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            on_change.emit(current_route());
        });
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }
        Self { closure }
    }
}

impl Drop for RouteListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "hashchange",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
