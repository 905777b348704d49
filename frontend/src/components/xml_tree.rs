//! Collapsible view of an interface's XSD structure.

use std::collections::BTreeSet;

use common::mapping::{child_path, expandable_paths, filter_elements};
use common::model::mapping::XsdElement;
use yew::html::Scope;
use yew::prelude::*;

use super::form::{icon_button, search_box};

pub enum Msg {
    Search(String),
    Toggle(String),
    ExpandAll,
    CollapseAll,
}

#[derive(Properties, PartialEq)]
pub struct XmlTreeProps {
    pub elements: Vec<XsdElement>,
    #[prop_or_default]
    pub selected_path: Option<AttrValue>,
    /// Receives the clicked element and its full path.
    pub on_select: Callback<(XsdElement, String)>,
}

pub struct XmlElementTree {
    search: String,
    expanded: BTreeSet<String>,
}

impl XmlElementTree {
    fn render_nodes(
        &self,
        link: &Scope<Self>,
        props: &XmlTreeProps,
        elements: &[XsdElement],
        parent: &str,
        expand_everything: bool,
    ) -> Html {
        html! {
            <ul class="tree">
                { for elements.iter().map(|element| {
                    let path = child_path(parent, &element.name);
                    let open = expand_everything || self.expanded.contains(&path);
                    let selected = props.selected_path.as_deref() == Some(path.as_str());
                    let on_select = {
                        let element = element.clone();
                        let path = path.clone();
                        props.on_select.reform(move |_: MouseEvent| (element.clone(), path.clone()))
                    };
                    let toggle = {
                        let path = path.clone();
                        link.callback(move |_: MouseEvent| Msg::Toggle(path.clone()))
                    };
                    html! {
                        <li>
                            <div class={classes!("tree-node", selected.then_some("selected"))}>
                                if element.has_children() {
                                    <button class="icon-btn tree-toggle" onclick={toggle}>
                                        <i class="material-icons">{ if open { "expand_more" } else { "chevron_right" } }</i>
                                    </button>
                                } else {
                                    <span class="tree-spacer"></span>
                                }
                                <span class="tree-label" onclick={on_select}>
                                    <span class="tree-name">{ element.name.clone() }</span>
                                    <span class="tree-type">{ element.type_label() }</span>
                                    if element.min_occurs.as_deref() == Some("0") {
                                        <span class="tree-badge">{"optional"}</span>
                                    }
                                </span>
                            </div>
                            if element.has_children() && open {
                                { self.render_nodes(link, props, &element.elements, &path, expand_everything) }
                            }
                        </li>
                    }
                }) }
            </ul>
        }
    }
}

impl Component for XmlElementTree {
    type Message = Msg;
    type Properties = XmlTreeProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            search: String::new(),
            expanded: BTreeSet::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Search(term) => self.search = term,
            Msg::Toggle(path) => {
                if !self.expanded.remove(&path) {
                    self.expanded.insert(path);
                }
            }
            Msg::ExpandAll => self.expanded = expandable_paths(&ctx.props().elements),
            Msg::CollapseAll => self.expanded.clear(),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let searching = !self.search.trim().is_empty();
        let visible = filter_elements(&props.elements, &self.search);

        html! {
            <div class="tree-panel">
                <div class="tree-toolbar">
                    { search_box("Search elements", &self.search, link.callback(Msg::Search)) }
                    { icon_button("unfold_more", "Expand", link.callback(|_| Msg::ExpandAll), searching) }
                    { icon_button("unfold_less", "Collapse", link.callback(|_| Msg::CollapseAll), searching) }
                </div>
                if visible.is_empty() {
                    <p class="muted">{ if searching { "No element matches" } else { "No schema loaded" } }</p>
                } else {
                    { self.render_nodes(link, props, &visible, "", searching) }
                }
            </div>
        }
    }
}
