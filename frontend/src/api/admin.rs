use common::endpoints;
use common::error::ApiResult;
use common::model::page::Page;
use common::model::user::{AuditLog, User, UserInput};
use common::requests::PageQuery;

use super::{ApiClient, Backend};

pub async fn users(api: &ApiClient) -> ApiResult<Vec<User>> {
    api.get(Backend::General, endpoints::USERS).await
}

pub async fn create_user(api: &ApiClient, input: &UserInput) -> ApiResult<User> {
    api.post(Backend::General, endpoints::USERS, input).await
}

pub async fn update_user(api: &ApiClient, id: i64, input: &UserInput) -> ApiResult<User> {
    api.put(Backend::General, &endpoints::user(id), input).await
}

pub async fn delete_user(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(Backend::General, &endpoints::user(id)).await
}

pub async fn audit_logs(api: &ApiClient, query: &PageQuery) -> ApiResult<Page<AuditLog>> {
    api.get(Backend::General, &endpoints::audit_logs_page(query))
        .await
}
