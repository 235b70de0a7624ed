use std::collections::VecDeque;

use export_core::{update, Effect, ElementId, Msg, Phase, WidgetState, WidgetViewModel};
use export_logging::{export_debug, export_trace, export_warn};

use crate::rpc::{RpcCall, RpcClient};

/// Receives what the host must show or do for a widget.
pub trait ViewSink: Send + Sync {
    fn render(&self, element: &ElementId, view: &WidgetViewModel);
    fn navigate(&self, element: &ElementId, url: &str);
}

/// Runs a widget's effects against an RPC client, one call at a time.
pub struct Driver<'a> {
    rpc: &'a dyn RpcClient,
    namespace: &'a str,
    sink: &'a dyn ViewSink,
    debug: bool,
}

impl<'a> Driver<'a> {
    pub fn new(rpc: &'a dyn RpcClient, namespace: &'a str, sink: &'a dyn ViewSink) -> Self {
        Self {
            rpc,
            namespace,
            sink,
            debug: false,
        }
    }

    /// Logs every outgoing request at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Feeds `msg` into the widget and keeps going until no call is pending.
    ///
    /// Each RPC call is awaited before its outcome is fed back, so a PDF
    /// queue is drained strictly in order. Returns the phase reached.
    pub async fn run(&self, element: &ElementId, state: &mut WidgetState, msg: Msg) -> Phase {
        let prefix = state.kind().log_prefix();
        let mut inbox = VecDeque::from([msg]);

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(std::mem::take(state), msg);
            *state = next;
            if state.consume_dirty() {
                self.sink.render(element, &state.view());
            }

            for effect in effects {
                match effect {
                    Effect::CallRpc { method, request } => {
                        if self.debug {
                            export_debug!(
                                "{} submitting to backend method={} params={:?}",
                                prefix,
                                method.name(),
                                request
                            );
                        }
                        let outcome = self
                            .rpc
                            .call(RpcCall {
                                namespace: self.namespace,
                                method: method.name(),
                                id: method.request_id(),
                                params: &request,
                            })
                            .await;
                        export_trace!("{} {} returned {:?}", prefix, method.name(), outcome);
                        inbox.push_back(match outcome {
                            Ok(reply) => Msg::RpcSucceeded(reply),
                            Err(err) => Msg::RpcFailed(err.into_failure()),
                        });
                    }
                    Effect::Navigate { url } => {
                        export_debug!("{} redirecting to {}", prefix, url);
                        self.sink.navigate(element, &url);
                    }
                    Effect::ReportFailure { code, message } => {
                        export_warn!("{} ERROR: code={}, {}", prefix, code, message);
                    }
                }
            }
        }

        state.phase()
    }
}
