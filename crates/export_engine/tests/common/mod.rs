#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use export_core::{ElementId, RpcReply, WidgetViewModel};
use export_engine::{RpcCall, RpcClient, RpcError, ViewSink};
use serde_json::Value;

/// A call as the server would have seen it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub id: Option<String>,
    pub params: Value,
    /// Progress percentage visible when the call went out.
    pub percent_at_dispatch: Option<f64>,
}

#[derive(Default)]
pub struct Recorder {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub views: Mutex<Vec<WidgetViewModel>>,
    pub navigations: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_view(&self) -> Option<WidgetViewModel> {
        self.views.lock().unwrap().last().cloned()
    }
}

/// Scripted RPC server: fails the per-topic call for any topic listed in
/// `failing`, succeeds otherwise. Join calls answer with `redirect`.
pub struct FakeRpc {
    pub recorder: Arc<Recorder>,
    pub failing: HashMap<String, RpcError>,
    pub redirect: Option<String>,
}

impl FakeRpc {
    pub fn new(recorder: Arc<Recorder>) -> Self {
        Self {
            recorder,
            failing: HashMap::new(),
            redirect: None,
        }
    }

    pub fn failing_on(mut self, topic: &str, err: RpcError) -> Self {
        self.failing.insert(topic.to_string(), err);
        self
    }

    pub fn redirecting_to(mut self, url: &str) -> Self {
        self.redirect = Some(url.to_string());
        self
    }
}

#[async_trait::async_trait]
impl RpcClient for FakeRpc {
    async fn call(&self, call: RpcCall<'_>) -> Result<RpcReply, RpcError> {
        assert_eq!(call.namespace, "ExportPlugin");
        let percent_at_dispatch = self
            .recorder
            .last_view()
            .and_then(|view| view.progress)
            .map(|progress| progress.percent);
        self.recorder.calls.lock().unwrap().push(RecordedCall {
            method: call.method.to_string(),
            id: call.id.map(ToOwned::to_owned),
            params: serde_json::to_value(call.params).unwrap(),
            percent_at_dispatch,
        });

        if !call.params.is_join() {
            if let Some(err) = call.params.topic().and_then(|t| self.failing.get(t)) {
                return Err(err.clone());
            }
        }
        let is_final = call.params.is_join() || call.method == "excel";
        Ok(RpcReply {
            redirect_url: if is_final { self.redirect.clone() } else { None },
        })
    }
}

pub struct RecordingSink {
    pub recorder: Arc<Recorder>,
}

impl ViewSink for RecordingSink {
    fn render(&self, _element: &ElementId, view: &WidgetViewModel) {
        self.recorder.views.lock().unwrap().push(view.clone());
    }

    fn navigate(&self, _element: &ElementId, url: &str) {
        self.recorder.navigations.lock().unwrap().push(url.to_string());
    }
}
