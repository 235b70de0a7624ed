use crate::view_model::{ProgressView, WidgetViewModel};
use crate::{
    Catalog, Dispatch, ExportQueue, ExportRequest, MessageKind, MessagePresenter,
    ValidationFailure, WidgetKind,
};

/// Submission lifecycle of one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Single Excel call in flight.
    Submitting,
    /// Per-topic PDF call `position` of `total` in flight.
    Draining { position: usize, total: usize },
    /// Final PDF join call in flight.
    Joining,
    Done,
    Failed,
}

impl Phase {
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            Phase::Submitting | Phase::Draining { .. } | Phase::Joining
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetState {
    kind: WidgetKind,
    catalog: Catalog,
    phase: Phase,
    locked: bool,
    presenter: MessagePresenter,
    progress: Option<ProgressView>,
    queue: Option<ExportQueue>,
    /// Request as serialized from the form, with the unsplit `Topic`.
    request: Option<ExportRequest>,
    dirty: bool,
}

impl WidgetState {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn queue(&self) -> Option<&ExportQueue> {
        self.queue.as_ref()
    }

    pub fn view(&self) -> WidgetViewModel {
        WidgetViewModel {
            kind: self.kind,
            phase: self.phase,
            locked: self.locked,
            banner: self.presenter.banner(),
            error_fields: self.presenter.error_fields().map(ToOwned::to_owned).collect(),
            progress: self.progress.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_submission(&mut self) {
        self.locked = true;
        self.presenter.hide_all();
        self.progress = None;
        self.queue = None;
        self.request = None;
        self.dirty = true;
    }

    pub(crate) fn reject(&mut self, failure: &ValidationFailure) {
        for field in &failure.empty_required {
            self.presenter.decorate(field.clone());
        }
        self.presenter
            .show(MessageKind::Error, &self.catalog.validation_error, None);
        self.finish(Phase::Failed);
    }

    pub(crate) fn start_single(&mut self) {
        self.phase = Phase::Submitting;
        self.dirty = true;
    }

    pub(crate) fn start_queue(&mut self, request: ExportRequest, topics: Vec<String>) {
        self.queue = Some(ExportQueue::new(topics));
        self.request = Some(request);
        self.progress = Some(ProgressView {
            percent: 0.0,
            label: None,
        });
        self.dirty = true;
    }

    /// Pops the next topic and ticks the progress indicator for it.
    pub(crate) fn advance_queue(&mut self) -> Option<(Dispatch, ExportRequest)> {
        let dispatch = self.queue.as_mut()?.next_dispatch()?;
        let mut request = self.request.clone()?;
        request.set_topic(dispatch.topic.clone());

        let total = self.queue.as_ref().map_or(0, ExportQueue::total);
        self.phase = Phase::Draining {
            position: dispatch.position,
            total,
        };
        self.progress = Some(ProgressView {
            percent: dispatch.percent,
            label: Some(self.catalog.processing_label(&dispatch.topic)),
        });
        self.dirty = true;
        Some((dispatch, request))
    }

    /// Hides progress and returns the original request flagged for joining.
    pub(crate) fn start_join(&mut self) -> Option<ExportRequest> {
        let mut request = self.request.clone()?;
        request.set_join(true);
        self.queue = None;
        self.progress = None;
        self.phase = Phase::Joining;
        self.dirty = true;
        Some(request)
    }

    pub(crate) fn succeed(&mut self) {
        self.presenter.hide_all();
        self.finish(Phase::Done);
    }

    pub(crate) fn fail(&mut self, text: &str) {
        self.presenter
            .show(MessageKind::Error, text, Some(&self.catalog.error_title));
        self.finish(Phase::Failed);
    }

    fn finish(&mut self, phase: Phase) {
        self.locked = false;
        self.progress = None;
        self.queue = None;
        self.request = None;
        self.phase = phase;
        self.dirty = true;
    }
}
