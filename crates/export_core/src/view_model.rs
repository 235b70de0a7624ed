use crate::{Banner, Phase, WidgetKind};

/// What the progress indicator shows; `None` in the view model means hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetViewModel {
    pub kind: WidgetKind,
    pub phase: Phase,
    /// Form is blocked while a submission is in flight.
    pub locked: bool,
    pub banner: Option<Banner>,
    pub error_fields: Vec<String>,
    pub progress: Option<ProgressView>,
    pub dirty: bool,
}
