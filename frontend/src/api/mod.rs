//! Thin REST client for the middleware backend.
//!
//! Two base URLs are in play: the general API (auth, clients, interfaces,
//! mapping, monitoring, administration) and the listener API (connector
//! configuration). Both get the bearer token; listener calls additionally
//! send the anti-forgery header and browser credentials.

pub mod admin;
pub mod auth;
pub mod clients;
pub mod connectors;
pub mod mapping;
pub mod monitoring;

use std::rc::Rc;

use common::config::{ConsoleConfig, CONSOLE_CONFIG_PATH};
use common::error::{ApiError, ApiResult};
use common::session::{cookie_value, TOKEN_KEY, XSRF_COOKIE, XSRF_HEADER};
use gloo_net::http::{Method, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, RequestCredentials};

use crate::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    General,
    Listener,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: Rc<ConsoleConfig>,
}

impl ApiClient {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    fn url(&self, backend: Backend, path: &str) -> String {
        match backend {
            Backend::General => self.config.api_url(path),
            Backend::Listener => self.config.listener_url(path),
        }
    }

    fn builder(&self, method: Method, backend: Backend, path: &str) -> RequestBuilder {
        let mut builder = RequestBuilder::new(&self.url(backend, path)).method(method);
        if let Some(token) = storage::get(TOKEN_KEY) {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        if backend == Backend::Listener {
            if let Some(xsrf) = xsrf_token() {
                builder = builder.header(XSRF_HEADER, &xsrf);
            }
            builder = builder.credentials(RequestCredentials::Include);
        }
        builder
    }

    pub async fn get<T: DeserializeOwned>(&self, backend: Backend, path: &str) -> ApiResult<T> {
        let request = self
            .builder(Method::GET, backend, path)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(send(request).await?).await
    }

    /// GET that only cares about the status, not the body.
    pub async fn check(&self, backend: Backend, path: &str) -> ApiResult<()> {
        let request = self
            .builder(Method::GET, backend, path)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        send(request).await.map(|_| ())
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self
            .builder(Method::POST, backend, path)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(send(request).await?).await
    }

    /// POST without a body, as used by the toggle endpoints.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
    ) -> ApiResult<T> {
        let request = self
            .builder(Method::POST, backend, path)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(send(request).await?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self
            .builder(Method::PUT, backend, path)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(send(request).await?).await
    }

    pub async fn delete(&self, backend: Backend, path: &str) -> ApiResult<()> {
        let request = self
            .builder(Method::DELETE, backend, path)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        send(request).await.map(|_| ())
    }

    /// Like [`ApiClient::post`] but for endpoints that reply without a body.
    pub async fn post_no_content<B: Serialize>(
        &self,
        backend: Backend,
        path: &str,
        body: &B,
    ) -> ApiResult<()> {
        let request = self
            .builder(Method::POST, backend, path)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        send(request).await.map(|_| ())
    }
}

async fn send(request: Request) -> ApiResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(response.status(), &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Value of the `XSRF-TOKEN` cookie, URI-decoded.
fn xsrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let cookies = document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
    let raw = cookie_value(&cookies, XSRF_COOKIE)?;
    js_sys::decode_uri_component(raw).ok().map(String::from)
}

/// Fetches the runtime configuration published by the console server.
pub async fn load_console_config() -> ApiResult<ConsoleConfig> {
    let response = Request::get(CONSOLE_CONFIG_PATH)
        .send()
        .await
        .map_err(|e| ApiError::Config(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Config(format!(
            "{} answered with status {}",
            CONSOLE_CONFIG_PATH,
            response.status()
        )));
    }
    response
        .json::<ConsoleConfig>()
        .await
        .map_err(|e| ApiError::Config(e.to_string()))
}
