use export_core::{ElementId, Phase, RpcFailure, WidgetViewModel};
use thiserror::Error;

/// JSON-RPC "internal error", used for failures that never reached the server.
pub const TRANSPORT_ERROR_CODE: i64 = -32603;
/// JSON-RPC "parse error", used for responses that are not a JSON-RPC envelope.
pub const PARSE_ERROR_CODE: i64 = -32700;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("invalid endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    /// The server answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Remote { code: i64, message: String },
    /// Non-success status without a JSON-RPC error object.
    #[error("http status {status}")]
    HttpStatus { status: u16, content: String },
    #[error("malformed response: {message}")]
    Malformed { message: String, content: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
}

impl RpcError {
    /// Converts into the `{code, message}` shape the widget state understands.
    ///
    /// Only failures that did not carry a JSON-RPC error object keep their raw
    /// response body as `content`.
    pub fn into_failure(self) -> RpcFailure {
        match self {
            RpcError::Remote { code, message } => RpcFailure {
                code,
                message,
                content: None,
            },
            RpcError::HttpStatus { status, content } => RpcFailure {
                code: i64::from(status),
                message: format!("http status {status}"),
                content: Some(content),
            },
            RpcError::Malformed { message, content } => RpcFailure {
                code: PARSE_ERROR_CODE,
                message,
                content: Some(content),
            },
            err @ (RpcError::InvalidEndpoint { .. }
            | RpcError::Timeout(_)
            | RpcError::Network(_)) => RpcFailure {
                code: TRANSPORT_ERROR_CODE,
                message: err.to_string(),
                content: None,
            },
        }
    }
}

/// Why a submit command was not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotMounted,
    /// A submission for the same element is still in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Mounted {
        element: ElementId,
        created: bool,
    },
    View {
        element: ElementId,
        view: WidgetViewModel,
    },
    Navigate {
        element: ElementId,
        url: String,
    },
    Rejected {
        element: ElementId,
        reason: RejectReason,
    },
    /// The submission reached a terminal phase (or ended without a call).
    Finished {
        element: ElementId,
        phase: Phase,
    },
}
