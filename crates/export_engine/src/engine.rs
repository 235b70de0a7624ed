use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use export_core::{
    Catalog, ElementId, FormSnapshot, Msg, WidgetKind, WidgetOptions, WidgetRegistry,
    WidgetState, WidgetViewModel,
};
use export_logging::{export_debug, export_error, export_info};
use tokio::sync::Mutex;

use crate::driver::{Driver, ViewSink};
use crate::rpc::{JsonRpcClient, RpcClient, RpcSettings};
use crate::{EngineEvent, RejectReason, RpcError};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub rpc: RpcSettings,
    pub catalog: Catalog,
}

enum EngineCommand {
    Mount {
        element: ElementId,
        kind: WidgetKind,
        options: WidgetOptions,
    },
    Submit {
        element: ElementId,
        form: FormSnapshot,
    },
}

/// A mounted widget. The state mutex is held for a whole submission.
struct WidgetSlot {
    state: Arc<Mutex<WidgetState>>,
    options: WidgetOptions,
}

/// Background runtime owning every mounted widget.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts an engine talking JSON-RPC over HTTP.
    pub fn new(config: EngineConfig) -> Result<Self, RpcError> {
        let client = JsonRpcClient::new(&config.rpc)?;
        Ok(Self::with_client(
            Arc::new(client),
            config.rpc.namespace,
            config.catalog,
        ))
    }

    /// Starts an engine on top of any RPC client.
    pub fn with_client(rpc: Arc<dyn RpcClient>, namespace: String, catalog: Catalog) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let namespace: Arc<str> = namespace.into();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    export_error!("failed to start export runtime: {}", err);
                    return;
                }
            };
            let mut registry: WidgetRegistry<WidgetSlot> = WidgetRegistry::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Mount {
                        element,
                        kind,
                        options,
                    } => {
                        export_debug!(
                            "{} mount {} debug={}",
                            kind.log_prefix(),
                            element,
                            options.debug
                        );
                        let created = registry.mount(element.clone(), || WidgetSlot {
                            state: Arc::new(Mutex::new(
                                WidgetState::new(kind).with_catalog(catalog.clone()),
                            )),
                            options,
                        });
                        if created {
                            export_info!("{} mounted on {}", kind.log_prefix(), element);
                        }
                        let _ = event_tx.send(EngineEvent::Mounted { element, created });
                    }
                    EngineCommand::Submit { element, form } => {
                        let Some(slot) = registry.get(&element) else {
                            let _ = event_tx.send(EngineEvent::Rejected {
                                element,
                                reason: RejectReason::NotMounted,
                            });
                            continue;
                        };
                        let state = slot.state.clone();
                        let debug = slot.options.debug;
                        let rpc = rpc.clone();
                        let namespace = namespace.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let submit = Submission {
                                rpc: rpc.as_ref(),
                                namespace: &namespace,
                                debug,
                                element,
                                event_tx,
                            };
                            submit.run(state, form).await;
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Binds a widget to `element`; a second mount of the same element is a no-op.
    pub fn mount(&self, element: ElementId, kind: WidgetKind, options: WidgetOptions) {
        let _ = self.cmd_tx.send(EngineCommand::Mount {
            element,
            kind,
            options,
        });
    }

    /// Fires the widget's trigger with the current form contents.
    pub fn submit(&self, element: ElementId, form: FormSnapshot) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { element, form });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

struct Submission<'a> {
    rpc: &'a dyn RpcClient,
    namespace: &'a str,
    debug: bool,
    element: ElementId,
    event_tx: mpsc::Sender<EngineEvent>,
}

impl Submission<'_> {
    async fn run(self, state: Arc<Mutex<WidgetState>>, form: FormSnapshot) {
        // A held lock means the form is still blocked by a running submission.
        let Ok(mut guard) = state.try_lock_owned() else {
            export_debug!("submit on {} ignored, submission in flight", self.element);
            let _ = self.event_tx.send(EngineEvent::Rejected {
                element: self.element,
                reason: RejectReason::Busy,
            });
            return;
        };

        let sink = ChannelViewSink::new(self.event_tx.clone());
        let phase = Driver::new(self.rpc, self.namespace, &sink)
            .with_debug(self.debug)
            .run(&self.element, &mut guard, Msg::Triggered(form))
            .await;
        drop(guard);

        let _ = self.event_tx.send(EngineEvent::Finished {
            element: self.element,
            phase,
        });
    }
}

struct ChannelViewSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelViewSink {
    fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

impl ViewSink for ChannelViewSink {
    fn render(&self, element: &ElementId, view: &WidgetViewModel) {
        self.send(EngineEvent::View {
            element: element.clone(),
            view: view.clone(),
        });
    }

    fn navigate(&self, element: &ElementId, url: &str) {
        self.send(EngineEvent::Navigate {
            element: element.clone(),
            url: url.to_string(),
        });
    }
}
