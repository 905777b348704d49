use common::error::ApiResult;
use common::model::mapping::{DatabaseField, MappingRule, XsdElement};
use common::resource::RequestId;

use crate::context::auth::AuthContext;
use crate::context::selection::SelectionContext;

pub enum Msg {
    AuthChanged(AuthContext),
    SelectionChanged(SelectionContext),
    Reload,
    XsdLoaded(RequestId, ApiResult<Vec<XsdElement>>),
    FieldsLoaded(RequestId, ApiResult<Vec<DatabaseField>>),
    RulesLoaded(RequestId, ApiResult<Vec<MappingRule>>),
    SelectElement((XsdElement, String)),
    SelectField(String),
    EditDraft(MappingRule),
    CloseDraft,
    SaveDraft,
    Created(ApiResult<MappingRule>),
    Search(String),
    AskDelete(MappingRule),
    CancelDelete,
    ConfirmDelete,
    Deleted(i64, ApiResult<()>),
    DismissErrors,
}
