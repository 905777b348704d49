//! Message handling for the mapping workbench.
//!
//! Nothing is fetched until both a client and an interface are selected.
//! The three loads run concurrently and each one only lands if it still
//! belongs to the current request, so switching interfaces mid-flight is
//! safe. Rules are appended after a successful create and removed only
//! after a successful delete; searching never refetches.

use common::mapping::{apply_delete, MappingDraft};
use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::TransformPage;
use crate::api;
use crate::components::toast::{show_toast, Severity};

/// Starts loading when the selector points at a new scope, clears the page
/// when the scope goes away.
pub fn sync_scope(page: &mut TransformPage, ctx: &Context<TransformPage>) -> bool {
    let scope = page.selected_scope();
    if scope == page.scope {
        return false;
    }
    page.clear();
    page.scope = scope;
    if scope.is_some() {
        load(page, ctx);
    }
    true
}

fn load(page: &mut TransformPage, ctx: &Context<TransformPage>) {
    let api = page.auth.as_ref().map(|a| a.api.clone());
    let (Some((client_id, interface_id)), Some(api)) = (page.scope, api) else {
        return;
    };
    log!(format!("Loading mapping data for interface {}", interface_id));

    let request = page.xsd.start();
    let link = ctx.link().clone();
    let client = api.clone();
    spawn_local(async move {
        let result = api::mapping::xsd_structure(&client, interface_id).await;
        link.send_message(Msg::XsdLoaded(request, result));
    });

    let request = page.fields.start();
    let link = ctx.link().clone();
    let client = api.clone();
    spawn_local(async move {
        let result = api::mapping::database_fields(&client, client_id, interface_id).await;
        link.send_message(Msg::FieldsLoaded(request, result));
    });

    let request = page.rules.start();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = api::mapping::rules(&api, client_id, interface_id).await;
        link.send_message(Msg::RulesLoaded(request, result));
    });
}

/// Opens the mapping dialog once both sides of a mapping are picked.
fn propose(page: &mut TransformPage) -> bool {
    let (Some((client_id, interface_id)), Some((element, path)), Some(field)) =
        (page.scope, &page.selected_element, &page.selected_field)
    else {
        return false;
    };
    let fields = page.fields.data().map(Vec::as_slice).unwrap_or_default();
    match MappingDraft::propose(
        client_id,
        interface_id,
        element,
        path,
        field,
        fields,
        page.existing_rule_count(),
    ) {
        Some(draft) => {
            page.draft = Some(draft);
            page.draft_errors = Default::default();
        }
        None => show_toast(&format!("{} is not a known database field", field), Severity::Error),
    }
    true
}

pub fn update(page: &mut TransformPage, ctx: &Context<TransformPage>, msg: Msg) -> bool {
    match msg {
        Msg::AuthChanged(auth) => {
            page.auth = Some(auth);
            false
        }
        Msg::SelectionChanged(selection) => {
            page.selection = Some(selection);
            sync_scope(page, ctx);
            true
        }
        Msg::Reload => {
            if page.scope.is_some() {
                load(page, ctx);
            }
            true
        }
        Msg::XsdLoaded(request, result) => {
            if let (Err(err), true) = (&result, page.xsd.is_pending(request)) {
                page.failed("load XSD structure", err);
            }
            page.xsd.complete(request, result)
        }
        Msg::FieldsLoaded(request, result) => {
            if let (Err(err), true) = (&result, page.fields.is_pending(request)) {
                page.failed("load database fields", err);
            }
            page.fields.complete(request, result)
        }
        Msg::RulesLoaded(request, result) => {
            if let (Err(err), true) = (&result, page.rules.is_pending(request)) {
                page.failed("load mapping rules", err);
            }
            page.rules.complete(request, result)
        }
        Msg::SelectElement(selected) => {
            page.selected_element = Some(selected);
            propose(page);
            true
        }
        Msg::SelectField(field) => {
            page.selected_field = Some(field);
            propose(page);
            true
        }
        Msg::EditDraft(rule) => {
            if let Some(draft) = &mut page.draft {
                draft.rule = rule;
            }
            true
        }
        Msg::CloseDraft => {
            page.draft = None;
            page.saving = false;
            true
        }
        Msg::SaveDraft => {
            let Some(api) = page.auth.as_ref().map(|a| a.api.clone()) else {
                return false;
            };
            let Some(draft) = &page.draft else {
                return false;
            };
            if let Err(errors) = draft.validate() {
                page.draft_errors = errors;
                return true;
            }
            page.draft_errors = Default::default();
            page.saving = true;
            let rule = draft.rule.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::mapping::create_rule(&api, &rule).await;
                link.send_message(Msg::Created(result));
            });
            true
        }
        Msg::Created(result) => {
            page.saving = false;
            match result {
                Ok(rule) => {
                    // A rule for an interface the user already left is dropped.
                    if page.scope == Some((rule.client_id, rule.interface_id)) {
                        if let Some(rules) = page.rules.data_mut() {
                            rules.push(rule);
                        }
                    }
                    page.draft = None;
                    page.selected_field = None;
                    show_toast("Mapping rule created", Severity::Success);
                }
                Err(err) => page.failed("create mapping rule", &err),
            }
            true
        }
        Msg::Search(term) => {
            page.search = term;
            true
        }
        Msg::AskDelete(rule) => {
            page.pending_delete = Some(rule);
            true
        }
        Msg::CancelDelete => {
            page.pending_delete = None;
            true
        }
        Msg::ConfirmDelete => {
            let api = page.auth.as_ref().map(|a| a.api.clone());
            let (Some(rule), Some(api)) = (page.pending_delete.take(), api) else {
                return true;
            };
            let Some(id) = rule.id else {
                return true;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::mapping::delete_rule(&api, id).await;
                link.send_message(Msg::Deleted(id, result));
            });
            true
        }
        Msg::Deleted(id, result) => {
            let applied = match page.rules.data_mut() {
                Some(rules) => apply_delete(rules, id, result),
                None => result.map(|()| None),
            };
            match applied {
                Ok(_) => show_toast("Mapping rule deleted", Severity::Success),
                Err(err) => page.failed("delete mapping rule", &err),
            }
            true
        }
        Msg::DismissErrors => {
            if page.xsd.error().is_some() {
                page.xsd.reset();
            }
            if page.fields.error().is_some() {
                page.fields.reset();
            }
            if page.rules.error().is_some() {
                page.rules.reset();
            }
            true
        }
    }
}
