//! Listener API calls for one connector kind.
//!
//! Every call is independent; callers track each one with its own
//! `OperationFlags` entry and reconcile results into a `ConfigCache`.

use std::marker::PhantomData;

use common::endpoints::{self, ListenerEndpoints};
use common::error::ApiResult;
use common::model::connector::{As2Algorithms, ConnectorConfig, TestConnectionResult};

use super::{ApiClient, Backend};

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorService<K: ConnectorConfig> {
    api: ApiClient,
    paths: ListenerEndpoints,
    kind: PhantomData<K>,
}

impl<K: ConnectorConfig> ConnectorService<K> {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            api: api.clone(),
            paths: ListenerEndpoints::new(K::KIND),
            kind: PhantomData,
        }
    }

    pub async fn fetch_all(&self) -> ApiResult<Vec<K>> {
        self.api.get(Backend::Listener, &self.paths.base()).await
    }

    pub async fn fetch_one(&self, id: i64) -> ApiResult<K> {
        self.api.get(Backend::Listener, &self.paths.by_id(id)).await
    }

    pub async fn fetch_by_client(&self, client_id: i64) -> ApiResult<Vec<K>> {
        self.api
            .get(Backend::Listener, &self.paths.by_client(client_id))
            .await
    }

    pub async fn fetch_by_interface(&self, interface_id: i64) -> ApiResult<Vec<K>> {
        self.api
            .get(Backend::Listener, &self.paths.by_interface(interface_id))
            .await
    }

    pub async fn create(&self, config: &K) -> ApiResult<K> {
        self.api
            .post(Backend::Listener, &self.paths.base(), config)
            .await
    }

    pub async fn update(&self, id: i64, config: &K) -> ApiResult<K> {
        self.api
            .put(Backend::Listener, &self.paths.by_id(id), config)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.delete(Backend::Listener, &self.paths.by_id(id)).await
    }

    /// Flips the active flag; returns the record as now stored.
    pub async fn toggle(&self, id: i64) -> ApiResult<K> {
        self.api
            .post_empty(Backend::Listener, &self.paths.toggle(id))
            .await
    }

    /// Submits the unsaved form; nothing is persisted.
    pub async fn test_connection(&self, config: &K) -> ApiResult<TestConnectionResult> {
        self.api
            .post(Backend::Listener, &self.paths.test(), config)
            .await
    }
}

pub async fn as2_algorithms(api: &ApiClient) -> ApiResult<As2Algorithms> {
    api.get(Backend::General, endpoints::AS2_ALGORITHMS).await
}
