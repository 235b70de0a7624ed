use crate::FormSnapshot;

/// Successful RPC response payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RpcReply {
    pub redirect_url: Option<String>,
}

/// Failed RPC call as seen by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcFailure {
    pub code: i64,
    pub message: String,
    /// Raw response body of a transport-level failure, if any.
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked the Excel trigger or submitted the PDF form.
    Triggered(FormSnapshot),
    /// The in-flight RPC call resolved successfully.
    RpcSucceeded(RpcReply),
    /// The in-flight RPC call failed.
    RpcFailed(RpcFailure),
}
