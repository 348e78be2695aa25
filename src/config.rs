//! executor configuration
//!
//! build an [`ExecutorConfig`] with an endpoint and optional static headers,
//! then pass it to [`crate::Executor::from_config`] or
//! [`crate::AsyncExecutor::from_config`].

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// configuration shared by the blocking and async executors
#[derive(Clone)]
pub struct ExecutorConfig {
    /// endpoint exactly as the caller supplied it
    pub(crate) endpoint: String,

    /// static headers attached to every request, keyed by lowercased name
    pub(crate) headers: BTreeMap<String, String>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,
}

impl ExecutorConfig {
    /// create a new configuration for a graphql endpoint
    ///
    /// nothing is validated here; the executor constructors do that.
    ///
    /// # example
    ///
    /// ```
    /// use graphql_executor::ExecutorConfig;
    ///
    /// let config = ExecutorConfig::new("https://api.example.com/graphql")
    ///     .with_header("Authorization", "Bearer token");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: BTreeMap::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("graphql-executor/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
        }
    }

    /// add a header to every request, replacing an earlier value for the same name
    ///
    /// names are case-insensitive and stored lowercased.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// add a set of headers to every request
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(
            headers
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into())),
        );
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// the configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// the configured static headers
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// check the endpoint and headers, returning their transport forms
    pub(crate) fn validate(&self) -> Result<(Url, HeaderMap)> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|err| Error::Config(format!("invalid endpoint {}: {err}", self.endpoint)))?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                endpoint.scheme()
            )));
        }

        Ok((endpoint, self.header_map()?))
    }

    /// static headers plus `content-type: application/json`, which always wins
    pub(crate) fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| Error::Config(format!("invalid header name {name}: {err}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| Error::Config(format!("invalid value for header {name}: {err}")))?;
            headers.insert(header_name, header_value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(headers)
    }
}

impl std::fmt::Debug for ExecutorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorConfig")
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}
