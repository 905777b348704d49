//! Rendering of the mapping workbench: schema tree, field tree, the rule
//! table and the mapping dialog.

use common::mapping::filter_rules;
use common::model::mapping::MappingRule;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::TransformPage;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::db_field_tree::DatabaseFieldTree;
use crate::components::form::{
    checkbox, empty_state, error_banner, icon_button, number_input, row_action, search_box,
    spinner, text_area, text_input,
};
use crate::components::xml_tree::XmlElementTree;
use crate::components::selector::ClientInterfaceSelector;
use crate::components::status_indicator::active_chip;
use crate::components::top_sheet::TopSheet;

pub fn view(page: &TransformPage, ctx: &Context<TransformPage>) -> Html {
    let link = ctx.link();
    let body = if page.scope.is_none() {
        empty_state("account_tree", "Select a client and an interface to start mapping")
    } else {
        html! {
            <>
                { load_errors(page, link) }
                <div class="workbench">
                    <section class="panel">
                        <h3>{"XML structure"}</h3>
                        { schema_panel(page, link) }
                    </section>
                    <section class="panel">
                        <h3>{"Database fields"}</h3>
                        { fields_panel(page, link) }
                    </section>
                </div>
                <section class="panel">
                    <div class="panel-header">
                        <h3>{ format!("Mapping rules ({})", page.existing_rule_count()) }</h3>
                        { search_box("Search rules", &page.search, link.callback(Msg::Search)) }
                    </div>
                    { rules_panel(page, link) }
                </section>
            </>
        }
    };
    html! {
        <div class="page">
            <div class="page-header">
                <h2>{"Transform"}</h2>
                <div class="toolbar">
                    { icon_button("refresh", "Reload", link.callback(|_| Msg::Reload), page.scope.is_none() || page.is_loading()) }
                </div>
            </div>
            <ClientInterfaceSelector />
            { body }
            { draft_dialog(page, link) }
            <ConfirmDialog
                open={page.pending_delete.is_some()}
                title="Delete mapping rule"
                message={page.pending_delete.as_ref().map(|r| format!("Delete the mapping {}?", r.name)).unwrap_or_default()}
                on_confirm={link.callback(|_| Msg::ConfirmDelete)}
                on_cancel={link.callback(|_| Msg::CancelDelete)}
            />
        </div>
    }
}

fn load_errors(page: &TransformPage, link: &Scope<TransformPage>) -> Html {
    let errors = page.load_errors();
    if errors.is_empty() {
        return html! {};
    }
    error_banner(&errors.join("; "), link.callback(|_| Msg::DismissErrors))
}

fn schema_panel(page: &TransformPage, link: &Scope<TransformPage>) -> Html {
    if page.xsd.is_loading() {
        return spinner();
    }
    match page.xsd.data() {
        Some(elements) if elements.is_empty() => {
            empty_state("description", "The interface has no XSD structure")
        }
        Some(elements) => html! {
            <XmlElementTree
                elements={elements.clone()}
                selected_path={page.selected_element.as_ref().map(|(_, path)| AttrValue::from(path.clone()))}
                on_select={link.callback(Msg::SelectElement)}
            />
        },
        None => html! {},
    }
}

fn fields_panel(page: &TransformPage, link: &Scope<TransformPage>) -> Html {
    if page.fields.is_loading() {
        return spinner();
    }
    match page.fields.data() {
        Some(fields) if fields.is_empty() => {
            empty_state("table_chart", "No database fields available")
        }
        Some(fields) => html! {
            <DatabaseFieldTree
                fields={fields.clone()}
                selected={page.selected_field.clone().map(AttrValue::from)}
                on_select={link.callback(Msg::SelectField)}
            />
        },
        None => html! {},
    }
}

fn rules_panel(page: &TransformPage, link: &Scope<TransformPage>) -> Html {
    if page.rules.is_loading() {
        return spinner();
    }
    let Some(rules) = page.rules.data() else {
        return html! {};
    };
    if rules.is_empty() {
        return empty_state(
            "rule",
            "No mapping rules yet. Pick an element and a field to create one.",
        );
    }
    let visible = filter_rules(rules, &page.search);
    if visible.is_empty() {
        return empty_state("search_off", "No rule matches the search");
    }
    html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>{"Name"}</th>
                    <th>{"XML path"}</th>
                    <th>{"Table"}</th>
                    <th>{"Column"}</th>
                    <th>{"Type"}</th>
                    <th>{"Priority"}</th>
                    <th>{"Active"}</th>
                    <th class="actions"></th>
                </tr>
            </thead>
            <tbody>
                { for visible.into_iter().map(|rule| rule_row(rule, link)) }
            </tbody>
        </table>
    }
}

fn rule_row(rule: &MappingRule, link: &Scope<TransformPage>) -> Html {
    let target = rule.clone();
    html! {
        <tr key={rule.id.map(|id| id.to_string()).unwrap_or_else(|| rule.xml_path.clone())}>
            <td>
                { rule.name.clone() }
                if !rule.description.is_empty() {
                    <div class="muted">{ rule.description.clone() }</div>
                }
            </td>
            <td><code>{ rule.xml_path.clone() }</code></td>
            <td>{ rule.table_name.clone() }</td>
            <td><code>{ rule.database_field.clone() }</code></td>
            <td>{ rule.data_type.clone() }</td>
            <td>{ rule.priority }</td>
            <td>{ active_chip(rule.is_active) }</td>
            <td class="actions">
                if rule.id.is_some() {
                    { row_action("delete", "Delete", link.callback(move |_| Msg::AskDelete(target.clone()))) }
                }
            </td>
        </tr>
    }
}

fn draft_dialog(page: &TransformPage, link: &Scope<TransformPage>) -> Html {
    let on_close = link.callback(|_| Msg::CloseDraft);
    let Some(draft) = &page.draft else {
        return html! { <TopSheet open={false} title="Create mapping" {on_close} /> };
    };
    let rule = &draft.rule;
    let text = |apply: fn(&mut MappingRule, String)| {
        let base = rule.clone();
        link.callback(move |value: String| {
            let mut next = base.clone();
            apply(&mut next, value);
            Msg::EditDraft(next)
        })
    };
    let flag = |apply: fn(&mut MappingRule, bool)| {
        let base = rule.clone();
        link.callback(move |value: bool| {
            let mut next = base.clone();
            apply(&mut next, value);
            Msg::EditDraft(next)
        })
    };
    let priority = {
        let base = rule.clone();
        link.callback(move |value: u32| {
            let mut next = base.clone();
            next.priority = i32::try_from(value).unwrap_or(i32::MAX);
            Msg::EditDraft(next)
        })
    };
    let actions = html! {
        <>
            <button class="btn" onclick={link.callback(|_| Msg::CloseDraft)}>{"Cancel"}</button>
            <button class="btn primary" disabled={page.saving} onclick={link.callback(|_| Msg::SaveDraft)}>
                { if page.saving { "Creating..." } else { "Create mapping" } }
            </button>
        </>
    };
    let errors = &page.draft_errors;
    html! {
        <TopSheet open={true} title="Create mapping" {on_close} {actions}>
            <dl class="mapping-summary">
                <dt>{"XML path"}</dt>
                <dd><code>{ rule.xml_path.clone() }</code></dd>
                <dt>{"Database field"}</dt>
                <dd><code>{ format!("{}.{}", rule.table_name, rule.database_field) }</code>{ format!(" ({})", rule.data_type) }</dd>
            </dl>
            if let Some(message) = errors.get("xmlPath").or(errors.get("databaseField")) {
                <div class="field-error">{ message.to_string() }</div>
            }
            { text_input("ruleName", "Name", &rule.name, errors.get("name"), text(|r, v| r.name = v)) }
            { text_area("ruleDescription", "Description", &rule.description, None, text(|r, v| r.description = v)) }
            { text_input("transformationRule", "Transformation rule", rule.transformation_rule.as_deref().unwrap_or_default(), None,
                text(|r, v| r.transformation_rule = (!v.trim().is_empty()).then_some(v))) }
            { text_input("defaultValue", "Default value", rule.default_value.as_deref().unwrap_or_default(), None,
                text(|r, v| r.default_value = (!v.trim().is_empty()).then_some(v))) }
            { number_input("rulePriority", "Priority", u32::try_from(rule.priority).unwrap_or_default(), None, priority) }
            { checkbox("ruleAttribute", "XML attribute", rule.is_attribute, flag(|r, v| r.is_attribute = v)) }
            { checkbox("ruleRequired", "Required", rule.required, flag(|r, v| r.required = v)) }
            { checkbox("ruleActive", "Active", rule.is_active, flag(|r, v| r.is_active = v)) }
        </TopSheet>
    }
}
