use web_sys::HtmlInputElement;
use yew::prelude::*;

pub enum Msg {
    ToggleVisibility,
}

#[derive(Properties, PartialEq)]
pub struct SecureFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_change: Callback<String>,
}

/// Password input with a show/hide toggle.
pub struct SecureField {
    visible: bool,
}

impl Component for SecureField {
    type Message = Msg;
    type Properties = SecureFieldProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { visible: false }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ToggleVisibility => {
                self.visible = !self.visible;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let oninput = props
            .on_change
            .reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value());
        let (input_type, icon, title) = if self.visible {
            ("text", "visibility_off", "Hide")
        } else {
            ("password", "visibility", "Show")
        };
        html! {
            <div class={classes!("form-field", "secure-field", props.error.as_ref().map(|_| "invalid"))}>
                <label for={props.id.clone()}>{ props.label.clone() }</label>
                <div class="secure-input">
                    <input id={props.id.clone()} type={input_type} autocomplete="new-password"
                        value={props.value.clone()} {oninput} />
                    <button type="button" class="icon-btn" title={title}
                        onclick={ctx.link().callback(|_| Msg::ToggleVisibility)}>
                        <i class="material-icons">{icon}</i>
                    </button>
                </div>
                if let Some(error) = &props.error {
                    <span class="field-error">{ error.clone() }</span>
                }
            </div>
        }
    }
}
