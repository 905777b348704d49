//! Editor for the SFTP monitored directories.

use common::validation::{add_directory, remove_directory};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::form::row_action;

pub enum Msg {
    Input(String),
    Add,
    Remove(usize),
}

#[derive(Properties, PartialEq)]
pub struct DirectoryListProps {
    pub directories: Vec<String>,
    pub on_change: Callback<Vec<String>>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

pub struct DirectoryList {
    draft: String,
}

impl Component for DirectoryList {
    type Message = Msg;
    type Properties = DirectoryListProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            draft: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let props = ctx.props();
        match msg {
            Msg::Input(value) => {
                self.draft = value;
                true
            }
            Msg::Add => {
                let mut directories = props.directories.clone();
                if add_directory(&mut directories, &self.draft) {
                    self.draft.clear();
                    props.on_change.emit(directories);
                    true
                } else {
                    false
                }
            }
            Msg::Remove(index) => {
                let mut directories = props.directories.clone();
                if remove_directory(&mut directories, index).is_some() {
                    props.on_change.emit(directories);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let oninput = link.callback(|e: InputEvent| {
            Msg::Input(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let onkeydown = link.batch_callback(|e: KeyboardEvent| {
            (e.key() == "Enter").then(|| {
                e.prevent_default();
                Msg::Add
            })
        });

        html! {
            <div class={classes!("form-field", "directory-list", props.error.as_ref().map(|_| "invalid"))}>
                <label>{"Monitored directories"}</label>
                <ul>
                    { for props.directories.iter().enumerate().map(|(index, dir)| html! {
                        <li>
                            <i class="material-icons">{"folder"}</i>
                            <span>{dir}</span>
                            { row_action("delete", "Remove directory", link.callback(move |_| Msg::Remove(index))) }
                        </li>
                    }) }
                </ul>
                <div class="inline-add">
                    <input type="text" placeholder="/inbound/orders" value={self.draft.clone()} {oninput} {onkeydown} />
                    <button class="btn" onclick={link.callback(|_| Msg::Add)} disabled={self.draft.trim().is_empty()}>
                        {"Add"}
                    </button>
                </div>
                if let Some(error) = &props.error {
                    <span class="field-error">{ error.clone() }</span>
                }
            </div>
        }
    }
}
