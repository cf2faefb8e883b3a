use crate::foundation::VoteSproutError;
use async_trait::async_trait;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Decoded JSON-RPC reply plus whether the HTTP exchange itself succeeded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonRpcResponse {
    pub http_ok: bool,
    pub result: Option<Value>,
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    pub fn ok(result: Value) -> Self {
        Self { http_ok: true, result: Some(result), error: None }
    }

    pub fn remote_error(code: i64, message: &str) -> Self {
        Self { http_ok: true, result: None, error: Some(JsonRpcErrorObject { code: Some(code), message: Some(message.to_string()), data: None }) }
    }

    pub fn is_error(&self) -> bool {
        !self.http_ok || self.error.is_some()
    }

    /// Non-null `result`, if the call succeeded.
    pub fn found(self) -> Option<Value> {
        if self.is_error() {
            return None;
        }
        self.result.filter(|value| !value.is_null())
    }

    /// The `result` of a successful call (`null` when absent). Failures become
    /// `RemoteService` carrying the remote message, or `fallback` when there is none.
    pub fn into_result(self, method: &str, fallback: &str) -> Result<Value, VoteSproutError> {
        if self.is_error() {
            let (code, message) = match self.error {
                Some(error) => (error.code, error.message.filter(|message| !message.is_empty())),
                None => (None, None),
            };
            return Err(VoteSproutError::remote(method, code, message.unwrap_or_else(|| fallback.to_string())));
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
pub trait JsonRpcTransport: Send + Sync {
    /// One request/response exchange. `Err` only for failures below JSON-RPC
    /// (connection, unreadable body); remote errors come back inside the response.
    async fn call(&self, method: &str, params: Value) -> Result<JsonRpcResponse, VoteSproutError>;
}

/// JSON-RPC 2.0 over HTTP POST.
pub struct HttpJsonRpcTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpJsonRpcTransport {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, VoteSproutError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| VoteSproutError::ConfigError(format!("http client: {err}")))?;
        Ok(Self { client, url: url.into(), next_id: AtomicU64::new(1) })
    }
}

#[async_trait]
impl JsonRpcTransport for HttpJsonRpcTransport {
    async fn call(&self, method: &str, params: Value) -> Result<JsonRpcResponse, VoteSproutError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "id": id, "jsonrpc": "2.0", "method": method, "params": params });
        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        trace!("json-rpc reply method={} id={} status={} bytes={}", method, id, status.as_u16(), bytes.len());
        let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|err| {
            VoteSproutError::NetworkError(format!("{method}: unreadable response (http {}): {err}", status.as_u16()))
        })?;
        Ok(JsonRpcResponse { http_ok: status.is_success(), result: envelope.result, error: envelope.error })
    }
}
