use common::endpoints;
use common::error::ApiResult;
use common::model::client::{Client, ClientInput};
use common::model::interface::{Interface, InterfaceInput};
use common::model::page::Page;
use common::requests::PageQuery;

use super::{ApiClient, Backend};

/// Page size used when the selector needs every client at once.
pub const SELECTOR_PAGE_SIZE: u32 = 100;

pub async fn page(api: &ApiClient, query: &PageQuery) -> ApiResult<Page<Client>> {
    api.get(Backend::General, &endpoints::clients_page(query)).await
}

pub async fn all(api: &ApiClient) -> ApiResult<Vec<Client>> {
    let query = PageQuery::default().with_page(0, SELECTOR_PAGE_SIZE);
    Ok(page(api, &query).await?.content)
}

pub async fn create(api: &ApiClient, input: &ClientInput) -> ApiResult<Client> {
    api.post(Backend::General, endpoints::CLIENTS, input).await
}

pub async fn update(api: &ApiClient, id: i64, input: &ClientInput) -> ApiResult<Client> {
    api.put(Backend::General, &endpoints::client(id), input).await
}

pub async fn delete(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(Backend::General, &endpoints::client(id)).await
}

pub async fn interfaces_of(api: &ApiClient, client_id: i64) -> ApiResult<Vec<Interface>> {
    api.get(Backend::General, &endpoints::client_interfaces(client_id))
        .await
}

pub async fn create_interface(api: &ApiClient, input: &InterfaceInput) -> ApiResult<Interface> {
    api.post(Backend::General, endpoints::INTERFACES, input).await
}

pub async fn update_interface(
    api: &ApiClient,
    id: i64,
    input: &InterfaceInput,
) -> ApiResult<Interface> {
    api.put(Backend::General, &endpoints::interface(id), input).await
}

pub async fn delete_interface(api: &ApiClient, id: i64) -> ApiResult<()> {
    api.delete(Backend::General, &endpoints::interface(id)).await
}
