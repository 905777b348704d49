//! Listener connector pages. SFTP and AS2 share one list and one form
//! component, parameterized by the connector kind; the API connector only
//! has the form.

pub mod api;
pub mod as2;
pub mod form;
pub mod list;
pub mod sftp;

use std::fmt::Debug;

use common::error::ApiError;
use common::model::connector::ConnectorConfig;
use common::route::Route;
use common::validation::{FieldErrors, Validate};
use yew::{Callback, Html};

use crate::context::auth::AuthContext;

pub trait ConnectorPage: ConnectorConfig + Validate + Default + Debug {
    const TITLE: &'static str;
    /// Lower case name used in messages ("SFTP configuration").
    const NOUN: &'static str;

    /// Where a saved form returns to; `None` keeps the form open.
    fn list_route() -> Option<Route>;
    fn new_route() -> Option<Route>;
    fn edit_route(id: i64) -> Option<Route>;

    fn columns() -> &'static [&'static str] {
        &[]
    }

    fn cells(&self) -> Vec<String> {
        Vec::new()
    }

    fn fields(&self, errors: &FieldErrors, on_change: Callback<Self>) -> Html;
}

/// Callback that applies one field edit to a copy of `base`.
pub fn edit<K, V>(
    base: &K,
    on_change: &Callback<K>,
    apply: impl Fn(&mut K, V) + 'static,
) -> Callback<V>
where
    K: Clone + 'static,
    V: 'static,
{
    let base = base.clone();
    on_change.reform(move |value| {
        let mut next = base.clone();
        apply(&mut next, value);
        next
    })
}

/// Session failures end the session; everything else is only logged here
/// and surfaced through the page's operation flags.
pub fn report(auth: Option<&AuthContext>, action: &str, err: &ApiError) {
    gloo_console::error!(format!("Failed to {}: {}", action, err));
    if err.is_session_invalid() {
        if let Some(auth) = auth {
            auth.expire.emit(());
        }
    }
}
