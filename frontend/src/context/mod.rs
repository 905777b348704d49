//! Providers that own the long-lived state of the console and hand it to
//! pages through Yew contexts.

pub mod auth;
pub mod monitoring;
pub mod selection;

use yew::context::ContextHandle;
use yew::html::Scope;
use yew::{Callback, Component};

/// Subscribes a struct component to a context. The handle must be kept for
/// as long as updates are wanted.
pub fn subscribe<C, T>(
    link: &Scope<C>,
    on_change: Callback<T>,
) -> (Option<T>, Option<ContextHandle<T>>)
where
    C: Component,
    T: Clone + PartialEq + 'static,
{
    link.context::<T>(on_change).unzip()
}
