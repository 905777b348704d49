//! State of the mapping workbench.

use common::error::ApiError;
use common::mapping::MappingDraft;
use common::model::mapping::{DatabaseField, MappingRule, XsdElement};
use common::resource::Resource;
use common::validation::FieldErrors;
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::components::toast::report_error;
use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;

/// `(client_id, interface_id)` the loaded data belongs to.
pub type Scope = (i64, i64);

pub struct TransformPage {
    pub auth: Option<AuthContext>,
    pub selection: Option<SelectionContext>,
    pub _auth_handle: Option<ContextHandle<AuthContext>>,
    pub _selection_handle: Option<ContextHandle<SelectionContext>>,

    pub scope: Option<Scope>,
    pub xsd: Resource<Vec<XsdElement>>,
    pub fields: Resource<Vec<DatabaseField>>,
    pub rules: Resource<Vec<MappingRule>>,

    /// Element clicked in the schema tree together with its full path.
    pub selected_element: Option<(XsdElement, String)>,
    /// `table.column` clicked in the field tree.
    pub selected_field: Option<String>,

    pub draft: Option<MappingDraft>,
    pub draft_errors: FieldErrors,
    pub saving: bool,

    pub search: String,
    pub pending_delete: Option<MappingRule>,
}

impl TransformPage {
    pub fn new(
        auth: Option<AuthContext>,
        auth_handle: Option<ContextHandle<AuthContext>>,
        selection: Option<SelectionContext>,
        selection_handle: Option<ContextHandle<SelectionContext>>,
    ) -> Self {
        Self {
            auth,
            selection,
            _auth_handle: auth_handle,
            _selection_handle: selection_handle,
            scope: None,
            xsd: Resource::default(),
            fields: Resource::default(),
            rules: Resource::default(),
            selected_element: None,
            selected_field: None,
            draft: None,
            draft_errors: FieldErrors::new(),
            saving: false,
            search: String::new(),
            pending_delete: None,
        }
    }

    /// Scope currently chosen in the selector, if both halves are set.
    pub fn selected_scope(&self) -> Option<Scope> {
        let selection = self.selection.as_ref()?;
        selection
            .state
            .scope()
            .map(|(client, interface)| (client.id, interface.id))
    }

    pub fn is_loading(&self) -> bool {
        self.xsd.is_loading() || self.fields.is_loading() || self.rules.is_loading()
    }

    pub fn load_errors(&self) -> Vec<&str> {
        [self.xsd.error(), self.fields.error(), self.rules.error()]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn existing_rule_count(&self) -> usize {
        self.rules.data().map_or(0, Vec::len)
    }

    /// Drops everything loaded for the previous scope.
    pub fn clear(&mut self) {
        self.xsd.reset();
        self.fields.reset();
        self.rules.reset();
        self.selected_element = None;
        self.selected_field = None;
        self.draft = None;
        self.draft_errors = FieldErrors::new();
        self.saving = false;
        self.search.clear();
        self.pending_delete = None;
    }

    pub fn failed(&self, action: &str, err: &ApiError) {
        let expire = self
            .auth
            .as_ref()
            .map(|a| a.expire.clone())
            .unwrap_or_else(Callback::noop);
        report_error(action, err, &expire);
    }
}
