use std::time::Duration;

use export_core::{ExportRequest, RpcReply};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::RpcError;

#[derive(Debug, Clone)]
pub struct RpcSettings {
    /// Base JSON-RPC endpoint; the namespace is appended as a path segment.
    pub endpoint: String,
    pub namespace: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/bin/jsonrpc".to_string(),
            namespace: "ExportPlugin".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Rendering a whole topic to PDF can take a while server-side.
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// One `(namespace, method, params)` invocation.
#[derive(Debug, Clone, Copy)]
pub struct RpcCall<'a> {
    pub namespace: &'a str,
    pub method: &'a str,
    pub id: Option<&'a str>,
    pub params: &'a ExportRequest,
}

#[async_trait::async_trait]
pub trait RpcClient: Send + Sync {
    async fn call(&self, call: RpcCall<'_>) -> Result<RpcReply, RpcError>;
}

#[derive(Serialize)]
struct RequestEnvelope<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a ExportRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    /// `Some(Value::Null)` for `"result": null`, `None` only when the key is absent.
    #[serde(default, deserialize_with = "present_value")]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 over HTTP POST, as served by the wiki's `jsonrpc` script.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl JsonRpcClient {
    pub fn new(settings: &RpcSettings) -> Result<Self, RpcError> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|err| RpcError::InvalidEndpoint {
            endpoint: settings.endpoint.clone(),
            message: err.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(RpcError::InvalidEndpoint {
                endpoint: settings.endpoint.clone(),
                message: "endpoint cannot be a base url".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RpcError::Network(err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    fn namespace_url(&self, namespace: &str) -> Url {
        let mut url = self.endpoint.clone();
        if !namespace.is_empty() {
            // Checked in `new`.
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(namespace);
            }
        }
        url
    }
}

#[async_trait::async_trait]
impl RpcClient for JsonRpcClient {
    async fn call(&self, call: RpcCall<'_>) -> Result<RpcReply, RpcError> {
        let envelope = RequestEnvelope {
            jsonrpc: "2.0",
            method: call.method,
            params: call.params,
            id: call.id,
        };
        let body = serde_json::to_vec(&envelope).map_err(|err| RpcError::Malformed {
            message: err.to_string(),
            content: String::new(),
        })?;

        let response = self
            .client
            .post(self.namespace_url(call.namespace))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let content = response.text().await.map_err(map_reqwest_error)?;
        parse_response(status, content)
    }
}

fn parse_response(status: reqwest::StatusCode, content: String) -> Result<RpcReply, RpcError> {
    let envelope = serde_json::from_str::<ResponseEnvelope>(&content);

    if let Ok(ResponseEnvelope {
        error: Some(error), ..
    }) = &envelope
    {
        return Err(RpcError::Remote {
            code: error.code,
            message: error.message.clone(),
        });
    }
    if !status.is_success() {
        return Err(RpcError::HttpStatus {
            status: status.as_u16(),
            content,
        });
    }

    match envelope {
        Ok(ResponseEnvelope {
            result: Some(result),
            ..
        }) => Ok(RpcReply {
            redirect_url: result
                .get("redirectUrl")
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned),
        }),
        Ok(_) => Err(RpcError::Malformed {
            message: "response has neither result nor error".to_string(),
            content,
        }),
        Err(err) => Err(RpcError::Malformed {
            message: err.to_string(),
            content,
        }),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RpcError {
    if err.is_timeout() {
        return RpcError::Timeout(err.to_string());
    }
    RpcError::Network(err.to_string())
}
