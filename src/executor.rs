//! blocking executor
//!
//! one call, one POST: [`Executor::execute`] blocks until the response is
//! read and classified.

use crate::config::ExecutorConfig;
use crate::error::{Error, Result};
use crate::graphql::{
    decode_body, parse_graphql_response, prepare_request, HttpRequest, JsonObject,
};
use crate::operation::Operation;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// blocking graphql executor
///
/// endpoint and headers are fixed at construction. clones share the same
/// configuration and connection pool.
#[derive(Clone)]
pub struct Executor {
    config: Arc<ExecutorConfig>,
    endpoint: Url,
    headers: HeaderMap,
    http: reqwest::blocking::Client,
}

impl Executor {
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

        let http = reqwest::blocking::Client::builder()
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
    ///
    /// `variables` defaults to `{}`. the mapper only runs on success.
    pub fn execute<T, F>(&self, query: &str, variables: Option<JsonObject>, mapper: F) -> Result<T>
    where
        F: FnOnce(JsonObject) -> T,
    {
        self.try_execute(query, variables, |data| Ok::<_, Error>(mapper(data)))
    }

    /// like [`Executor::execute`], for mappers that can fail
    pub fn try_execute<T, E, F>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
        mapper: F,
    ) -> Result<T>
    where
        E: Into<Error>,
        F: FnOnce(JsonObject) -> std::result::Result<T, E>,
    {
        self.try_execute_with(query, variables, mapper, |request| self.send(request))
    }

    /// execute a query and deserialize the `data` object into `T`
    pub fn execute_typed<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
    ) -> Result<T> {
        self.try_execute(query, variables, |data| {
            serde_json::from_value(serde_json::Value::Object(data))
        })
    }

    /// execute a static operation
    pub fn execute_operation<O: Operation>(
        &self,
        variables: Option<JsonObject>,
    ) -> Result<O::Response> {
        self.execute_typed(O::QUERY, variables)
    }

    fn send(&self, request: HttpRequest) -> Result<(StatusCode, String)> {
        let response = self
            .http
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()?;
        let status = response.status();
        let text = decode_body(&response.bytes()?);
        Ok((status, text))
    }

    pub(crate) fn try_execute_with<T, E, F, S>(
        &self,
        query: &str,
        variables: Option<JsonObject>,
        mapper: F,
        send: S,
    ) -> Result<T>
    where
        E: Into<Error>,
        F: FnOnce(JsonObject) -> std::result::Result<T, E>,
        S: FnOnce(HttpRequest) -> Result<(StatusCode, String)>,
    {
        let request = prepare_request(&self.endpoint, &self.headers, query, variables)?;
        tracing::debug!(endpoint = %self.endpoint, query_len = query.len(), "sending graphql request");

        let (status, text) = send(request)?;
        tracing::debug!(status = status.as_u16(), body_len = text.len(), "received graphql response");

        let data = parse_graphql_response(status, text)
            .inspect_err(|err| tracing::debug!(error = %err, "graphql request failed"))?;
        mapper(data).map_err(Into::into)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    fn test_executor() -> Executor {
        Executor::with_headers(
            "http://localhost:1234/graphql",
            [("Authorization", "Bearer t0ken"), ("X-Tenant", "acme")],
        )
        .unwrap()
    }

    fn ok(body: &str) -> Result<(StatusCode, String)> {
        Ok((StatusCode::OK, body.to_string()))
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(object) => object,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_execute_sends_headers_and_body() {
        let executor = test_executor();
        let captured = RefCell::new(Vec::new());

        for _ in 0..2 {
            executor
                .try_execute_with(
                    "query($id: ID!) { node(id: $id) { id } }",
                    Some(object(json!({"id": "n1"}))),
                    |data| Ok::<_, Error>(data),
                    |request| {
                        captured.borrow_mut().push(request);
                        ok(r#"{"data": {"node": {"id": "n1"}}}"#)
                    },
                )
                .unwrap();
        }

        let captured = captured.into_inner();
        assert_eq!(captured.len(), 2);
        for request in captured {
            assert_eq!(request.url.as_str(), "http://localhost:1234/graphql");
            assert_eq!(request.headers.get("authorization").unwrap(), "Bearer t0ken");
            assert_eq!(request.headers.get("x-tenant").unwrap(), "acme");
            assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");

            let body: Value = serde_json::from_str(&request.body).unwrap();
            assert_eq!(
                body,
                json!({
                    "query": "query($id: ID!) { node(id: $id) { id } }",
                    "variables": {"id": "n1"},
                })
            );
        }
    }

    #[test]
    fn test_execute_applies_mapper() {
        let executor = test_executor();
        let value = executor
            .try_execute_with(
                "{ x }",
                None,
                |data| Ok::<_, Error>(data["x"].as_i64().unwrap_or_default() * 10),
                |_request| ok(r#"{"data": {"x": 1}}"#),
            )
            .unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn test_execute_mapper_not_called_on_error() {
        let executor = test_executor();
        let called = RefCell::new(false);
        let err = executor
            .try_execute_with(
                "{ x }",
                None,
                |_data| {
                    *called.borrow_mut() = true;
                    Ok::<_, Error>(())
                },
                |_request| ok(r#"{"error": "bad query"}"#),
            )
            .unwrap_err();

        assert!(matches!(err, Error::GraphQl { ref message, .. } if message == "bad query"));
        assert!(!*called.borrow());
    }

    #[test]
    fn test_execute_http_error() {
        let executor = test_executor();
        let err = executor
            .try_execute_with(
                "{ x }",
                None,
                |data| Ok::<_, Error>(data),
                |_request| Ok((StatusCode::NOT_FOUND, r#"{"data": {"x": 1}}"#.to_string())),
            )
            .unwrap_err();

        assert!(err.is_transport());
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[test]
    fn test_execute_transport_failure_is_propagated() {
        let executor = test_executor();
        let err = executor
            .try_execute_with(
                "{ x }",
                None,
                |data| Ok::<_, Error>(data),
                |_request| Err(Error::Config("boom".to_string())),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_try_execute_surfaces_mapper_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Data {
            value: i64,
        }

        let executor = test_executor();
        let err = executor
            .try_execute_with(
                "{ value }",
                None,
                |data| serde_json::from_value::<Data>(Value::Object(data)),
                |_request| ok(r#"{"data": {"value": "seven"}}"#),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_new_rejects_bad_endpoint() {
        let err = Executor::new("localhost graphql").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_executor_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Executor>();
    }
}
