use serde::Deserialize;

use crate::RpcMethod;

/// Which export widget a controller implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Click-triggered, one `excel` call.
    #[default]
    Excel,
    /// Submit-triggered, one `pdf` call per topic plus a join call.
    Pdf,
}

impl WidgetKind {
    pub fn method(self) -> RpcMethod {
        match self {
            WidgetKind::Excel => RpcMethod::Excel,
            WidgetKind::Pdf => RpcMethod::Pdf,
        }
    }

    /// Prefix for this widget's log lines.
    pub fn log_prefix(self) -> &'static str {
        match self {
            WidgetKind::Excel => "EXCEL-EXPORT:",
            WidgetKind::Pdf => "PDF-EXPORT:",
        }
    }

    /// Marker class of elements that get this widget mounted.
    pub fn marker_class(self) -> &'static str {
        match self {
            WidgetKind::Excel => "jqExcelExport",
            WidgetKind::Pdf => "jqPdfExport",
        }
    }
}

/// Per-widget options, merged from defaults and the element's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Log every outgoing request at debug level.
    pub debug: bool,
}
