//! Sheet that slides down from the top of the viewport; every dialog of the
//! console is rendered inside one.

use gloo_timers::future::TimeoutFuture;
use uuid::Uuid;
use yew::platform::spawn_local;
use yew::prelude::*;

pub struct TopSheet {
    id: String,
    node_ref: NodeRef,
}

#[derive(Properties, PartialEq)]
pub struct TopSheetProps {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub actions: Html,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = TopSheetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
            node_ref: NodeRef::default(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_close = props.on_close.reform(|_: MouseEvent| ());
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={self.node_ref.clone()}>
                <div class="top-sheet-header">
                    <h2>{ props.title.clone() }</h2>
                    <button class="icon-btn" title="Close" onclick={on_close}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                <div class="top-sheet-body">
                    { props.children.clone() }
                </div>
                <div class="top-sheet-actions">
                    { props.actions.clone() }
                </div>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let open = ctx.props().open;
        let node_ref = self.node_ref.clone();
        // The class is toggled a tick later so the CSS transition runs on
        // freshly mounted sheets too.
        spawn_local(async move {
            TimeoutFuture::new(50).await;
            if let Some(sheet) = node_ref.cast::<web_sys::HtmlElement>() {
                let classes = sheet.class_list();
                let _ = if open {
                    classes.add_1("show")
                } else {
                    classes.remove_1("show")
                };
            }
        });
    }
}
