//! Client and interface pickers bound to the shared selection.

use web_sys::HtmlSelectElement;
use yew::context::ContextHandle;
use yew::prelude::*;

use super::form::{error_banner, icon_button};
use crate::context::selection::SelectionContext;
use crate::context::subscribe;

pub enum Msg {
    SelectionChanged(SelectionContext),
}

#[derive(Properties, PartialEq)]
pub struct SelectorProps {
    /// Hide the interface picker on pages that only need a client.
    #[prop_or(true)]
    pub with_interface: bool,
}

pub struct ClientInterfaceSelector {
    selection: Option<SelectionContext>,
    _handle: Option<ContextHandle<SelectionContext>>,
}

fn parse_id(value: String) -> Option<i64> {
    value.parse().ok()
}

impl Component for ClientInterfaceSelector {
    type Message = Msg;
    type Properties = SelectorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (selection, handle) = subscribe(ctx.link(), ctx.link().callback(Msg::SelectionChanged));
        Self {
            selection,
            _handle: handle,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectionChanged(selection) => {
                self.selection = Some(selection);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(selection) = &self.selection else {
            return html! {};
        };
        let state = &selection.state;
        let selected_client = state.selected_client().map(|c| c.id);
        let selected_interface = state.selected_interface().map(|i| i.id);

        let on_client = selection
            .select_client
            .reform(|e: Event| parse_id(e.target_unchecked_into::<HtmlSelectElement>().value()));
        let on_interface = selection
            .select_interface
            .reform(|e: Event| parse_id(e.target_unchecked_into::<HtmlSelectElement>().value()));
        let on_refresh = {
            let refresh_clients = selection.refresh_clients.clone();
            let refresh_interfaces = selection.refresh_interfaces.clone();
            let has_client = selected_client.is_some();
            Callback::from(move |_: MouseEvent| {
                if has_client {
                    refresh_interfaces.emit(());
                } else {
                    refresh_clients.emit(());
                }
            })
        };

        html! {
            <div class="selector-bar">
                <div class="form-field">
                    <label for="client-select">{"Client"}</label>
                    <select id="client-select" onchange={on_client} disabled={state.clients().is_empty()}>
                        <option value="" selected={selected_client.is_none()}>{"Select a client"}</option>
                        { for state.clients().iter().map(|c| html! {
                            <option value={c.id.to_string()} selected={Some(c.id) == selected_client}>
                                { format!("{} ({})", c.name, c.code) }
                            </option>
                        }) }
                    </select>
                </div>
                if ctx.props().with_interface {
                    <div class="form-field">
                        <label for="interface-select">{"Interface"}</label>
                        <select id="interface-select" onchange={on_interface}
                            disabled={selected_client.is_none() || state.is_loading_interfaces()}>
                            <option value="" selected={selected_interface.is_none()}>
                                { if state.is_loading_interfaces() { "Loading..." } else { "Select an interface" } }
                            </option>
                            { for state.interfaces().iter().map(|i| html! {
                                <option value={i.id.to_string()} selected={Some(i.id) == selected_interface}>
                                    { format!("{} ({})", i.name, i.interface_type) }
                                </option>
                            }) }
                        </select>
                    </div>
                }
                { icon_button("refresh", "Refresh", on_refresh, state.is_loading()) }
                if let Some(error) = state.error() {
                    { error_banner(error, selection.dismiss_error.reform(|_: MouseEvent| ())) }
                }
            </div>
        }
    }
}
