//! async executor
//!
//! same contract as [`crate::Executor`], for callers already inside an
//! async runtime. classification is shared, so both report identical errors.

use crate::config::ExecutorConfig;
use crate::error::{Error, Result};
use crate::graphql::{
    decode_body, parse_graphql_response, prepare_request, HttpRequest, JsonObject,
};
use crate::operation::Operation;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// async graphql executor
#[derive(Clone)]
pub struct AsyncExecutor {
    config: Arc<ExecutorConfig>,
    endpoint: Url,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl AsyncExecutor {
    /// create an executor for an endpoint with no extra headers
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::from_config(ExecutorConfig::new(endpoint))
    }

    /// create an executor that sends `headers` with every request
    pub fn with_headers<I, K, V>(endpoint: impl Into<String>, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_config(ExecutorConfig::new(endpoint).with_headers(headers))
    }

    /// create an executor from a full configuration
    pub fn from_config(config: ExecutorConfig) -> Result<Self> {
        let (endpoint, headers) = config.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            headers,
            http,
        })
    }

    /// access the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// execute a query or mutation and map the `data` object
    pub async fn execute<T, F>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
        mapper: F,
    ) -> Result<T>
    where
        F: FnOnce(JsonObject) -> T,
    {
        self.try_execute(query, variables, |data| Ok::<_, Error>(mapper(data)))
            .await
    }

    /// like [`AsyncExecutor::execute`], for mappers that can fail
    pub async fn try_execute<T, E, F>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
        mapper: F,
    ) -> Result<T>
    where
        E: Into<Error>,
        F: FnOnce(JsonObject) -> std::result::Result<T, E>,
    {
        self.try_execute_with(query, variables, mapper, |request| async move {
            let response = self
                .http
                .post(request.url)
                .headers(request.headers)
                .body(request.body)
                .send()
                .await?;
            let status = response.status();
            let text = decode_body(&response.bytes().await?);
            Ok((status, text))
        })
        .await
    }

    /// execute a query and deserialize the `data` object into `T`
    pub async fn execute_typed<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
    ) -> Result<T> {
        self.try_execute(query, variables, |data| {
            serde_json::from_value(serde_json::Value::Object(data))
        })
        .await
    }

    /// execute a static operation
    pub async fn execute_operation<O: Operation>(
        &self,
        variables: Option<JsonObject>,
    ) -> Result<O::Response> {
        self.execute_typed(O::QUERY, variables).await
    }

    pub(crate) async fn try_execute_with<T, E, F, S, Fut>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
        mapper: F,
        send: S,
    ) -> Result<T>
    where
        E: Into<Error>,
        F: FnOnce(JsonObject) -> std::result::Result<T, E>,
        S: FnOnce(HttpRequest) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let request = prepare_request(&self.endpoint, &self.headers, query, variables)?;
        tracing::debug!(endpoint = %self.endpoint, query_len = query.len(), "sending graphql request");

        let (status, text) = send(request).await?;
        tracing::debug!(status = status.as_u16(), body_len = text.len(), "received graphql response");

        let data = parse_graphql_response(status, text)
            .inspect_err(|err| tracing::debug!(error = %err, "graphql request failed"))?;
        mapper(data).map_err(Into::into)
    }
}

impl std::fmt::Debug for AsyncExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
