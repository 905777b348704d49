//! Database columns grouped by table.

use std::collections::BTreeSet;

use common::mapping::{column_label, group_fields_by_table};
use common::model::mapping::DatabaseField;
use yew::prelude::*;

use super::form::search_box;

pub enum Msg {
    Search(String),
    ToggleTable(String),
}

#[derive(Properties, PartialEq)]
pub struct DbFieldTreeProps {
    pub fields: Vec<DatabaseField>,
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    /// Receives the `table.column` key.
    pub on_select: Callback<String>,
}

pub struct DatabaseFieldTree {
    search: String,
    collapsed: BTreeSet<String>,
}

impl Component for DatabaseFieldTree {
    type Message = Msg;
    type Properties = DbFieldTreeProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            search: String::new(),
            collapsed: BTreeSet::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Search(term) => self.search = term,
            Msg::ToggleTable(table) => {
                if !self.collapsed.remove(&table) {
                    self.collapsed.insert(table);
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let term = self.search.trim().to_lowercase();
        let fields: Vec<DatabaseField> = props
            .fields
            .iter()
            .filter(|f| term.is_empty() || f.field.to_lowercase().contains(&term))
            .cloned()
            .collect();
        let groups = group_fields_by_table(&fields);

        html! {
            <div class="tree-panel">
                <div class="tree-toolbar">
                    { search_box("Search fields", &self.search, link.callback(Msg::Search)) }
                </div>
                if groups.is_empty() {
                    <p class="muted">{"No database fields"}</p>
                }
                <ul class="tree">
                    { for groups.into_iter().map(|(table, members)| {
                        let open = !term.is_empty() || !self.collapsed.contains(&table);
                        let toggle = {
                            let table = table.clone();
                            link.callback(move |_: MouseEvent| Msg::ToggleTable(table.clone()))
                        };
                        html! {
                            <li>
                                <div class="tree-node table-node" onclick={toggle}>
                                    <i class="material-icons">{ if open { "expand_more" } else { "chevron_right" } }</i>
                                    <i class="material-icons">{"table_chart"}</i>
                                    <span class="tree-name">{ table.clone() }</span>
                                </div>
                                if open {
                                    <ul class="tree">
                                        { for members.into_iter().map(|field| {
                                            let key = field.field.clone();
                                            let selected = props.selected.as_deref() == Some(key.as_str());
                                            let onclick = props.on_select.reform(move |_: MouseEvent| key.clone());
                                            html! {
                                                <li>
                                                    <div class={classes!("tree-node", selected.then_some("selected"))} {onclick}>
                                                        <span class="tree-spacer"></span>
                                                        <span class="tree-name">{ column_label(field) }</span>
                                                        <span class="tree-type">{ field.field_type.clone() }</span>
                                                        if field.required {
                                                            <span class="tree-badge">{"required"}</span>
                                                        }
                                                    </div>
                                                </li>
                                            }
                                        }) }
                                    </ul>
                                }
                            </li>
                        }
                    }) }
                </ul>
            </div>
        }
    }
}
