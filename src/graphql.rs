//! graphql wire types
//!
//! request envelope, response classification, and typed error entries.
//! both executors funnel through [`prepare_request`] and
//! [`parse_graphql_response`], so blocking and async callers see the same
//! classification.

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// a json object, used for both variables and the `data` payload
pub type JsonObject = serde_json::Map<String, Value>;

/// outgoing request body: `{"query": ..., "variables": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    /// query or mutation document
    pub query: String,
    /// variables bound into the document
    #[serde(default)]
    pub variables: JsonObject,
}

impl GraphQlRequest {
    /// build an envelope; missing variables become `{}`
    pub fn new(query: impl Into<String>, variables: Option<JsonObject>) -> Self {
        Self {
            query: query.into(),
            variables: variables.unwrap_or_default(),
        }
    }
}

/// a fully built http request, handed to the transport as-is
#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

/// graphql error entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    /// error message
    pub message: String,
    /// error locations in the query
    #[serde(default)]
    pub locations: Vec<GraphQlLocation>,
    /// response path
    #[serde(default)]
    pub path: Vec<Value>,
    /// optional extensions payload
    #[serde(default)]
    pub extensions: Option<Value>,
}

/// graphql error location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// line number (1-based)
    pub line: i64,
    /// column number (1-based)
    pub column: i64,
}

pub(crate) fn prepare_request(
    endpoint: &Url,
    headers: &HeaderMap,
    query: &str,
    variables: Option<JsonObject>,
) -> Result<HttpRequest> {
    let envelope = GraphQlRequest::new(query, variables);
    let body = serde_json::to_string(&envelope)?;
    Ok(HttpRequest {
        url: endpoint.clone(),
        headers: headers.clone(),
        body,
    })
}

/// response bodies are always read as utf-8, whatever charset the server names
pub(crate) fn decode_body(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// classify a raw response and hand back the `data` object
///
/// order matters: status, then json shape, then `error`, then `errors`,
/// and only then `data`. a present error field fails the call whatever its
/// value, `null` included.
pub(crate) fn parse_graphql_response(status: StatusCode, text: String) -> Result<JsonObject> {
    if status != StatusCode::OK {
        return Err(Error::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    let parsed: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => return Err(Error::malformed(format!("invalid json: {err}"), &text)),
    };
    let mut response = match parsed {
        Value::Object(object) => object,
        other => {
            return Err(Error::malformed(
                format!("expected a json object, got {}", kind(&other)),
                &text,
            ))
        }
    };

    match response.remove("error") {
        None => {}
        Some(Value::String(message)) => {
            return Err(Error::GraphQl {
                message,
                errors: Vec::new(),
            })
        }
        Some(other) => {
            return Err(Error::GraphQl {
                message: other.to_string(),
                errors: Vec::new(),
            })
        }
    }

    match response.remove("errors") {
        None => {}
        Some(Value::Array(errors)) => {
            let message = errors.iter().map(Value::to_string).collect::<String>();
            return Err(Error::GraphQl { message, errors });
        }
        Some(other) => {
            return Err(Error::GraphQl {
                message: other.to_string(),
                errors: vec![other],
            })
        }
    }

    match response.remove("data") {
        Some(Value::Object(data)) => Ok(data),
        None | Some(Value::Null) => Err(Error::malformed("response has no `data` object", &text)),
        Some(other) => Err(Error::malformed(
            format!("`data` must be an object, got {}", kind(&other)),
            &text,
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
