use yew::prelude::*;

use super::top_sheet::TopSheet;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::from("Delete"))]
    pub confirm_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Asks before a destructive action.
pub struct ConfirmDialog;

impl Component for ConfirmDialog {
    type Message = ();
    type Properties = ConfirmDialogProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let actions = html! {
            <>
                <button class="btn" onclick={props.on_cancel.reform(|_: MouseEvent| ())}>{"Cancel"}</button>
                <button class="btn danger" onclick={props.on_confirm.reform(|_: MouseEvent| ())}>
                    { props.confirm_label.clone() }
                </button>
            </>
        };
        html! {
            <TopSheet open={props.open} title={props.title.clone()} on_close={props.on_cancel.clone()} {actions}>
                <p>{ props.message.clone() }</p>
            </TopSheet>
        }
    }
}
