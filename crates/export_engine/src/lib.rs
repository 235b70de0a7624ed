//! Export engine: JSON-RPC transport and effect execution.
mod driver;
mod engine;
mod rpc;
mod types;

pub use driver::{Driver, ViewSink};
pub use engine::{EngineConfig, EngineHandle};
pub use rpc::{JsonRpcClient, RpcCall, RpcClient, RpcSettings};
pub use types::{EngineEvent, RejectReason, RpcError, PARSE_ERROR_CODE, TRANSPORT_ERROR_CODE};
