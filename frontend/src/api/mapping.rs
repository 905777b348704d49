use common::endpoints;
use common::error::ApiResult;
use common::model::mapping::{DatabaseField, MappingRule, XsdElement};

use super::{ApiClient, Backend};

pub async fn xsd_structure(api: &ApiClient, interface_id: i64) -> ApiResult<Vec<XsdElement>> {
    api.get(Backend::General, &endpoints::xsd_structure(interface_id))
        .await
}

pub async fn database_fields(
    api: &ApiClient,
    client_id: i64,
    interface_id: i64,
) -> ApiResult<Vec<DatabaseField>> {
    api.get(
        Backend::General,
        &endpoints::database_fields(client_id, interface_id),
    )
    .await
}

pub async fn rules(
    api: &ApiClient,
    client_id: i64,
    interface_id: i64,
) -> ApiResult<Vec<MappingRule>> {
    api.get(
        Backend::General,
        &endpoints::interface_mappings(client_id, interface_id),
    )
    .await
}

pub async fn create_rule(api: &ApiClient, rule: &MappingRule) -> ApiResult<MappingRule> {
    api.post(Backend::General, endpoints::MAPPING_RULES, rule).await
}

pub async fn delete_rule(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(Backend::General, &endpoints::mapping_rule(id)).await
}
