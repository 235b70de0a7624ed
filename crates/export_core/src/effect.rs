use crate::ExportRequest;

/// Server-side export methods in the `ExportPlugin` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    Excel,
    Pdf,
}

impl RpcMethod {
    pub fn name(self) -> &'static str {
        match self {
            RpcMethod::Excel => "excel",
            RpcMethod::Pdf => "pdf",
        }
    }

    /// Fixed JSON-RPC id, if the method uses one.
    pub fn request_id(self) -> Option<&'static str> {
        match self {
            RpcMethod::Excel => None,
            RpcMethod::Pdf => Some("export1"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one RPC call; its outcome must be fed back as a message before
    /// anything else is dispatched for this widget.
    CallRpc {
        method: RpcMethod,
        request: ExportRequest,
    },
    /// Send the browser (or host) to the server-provided target.
    Navigate { url: String },
    /// A remote failure to be logged for diagnostics.
    ReportFailure { code: i64, message: String },
}
