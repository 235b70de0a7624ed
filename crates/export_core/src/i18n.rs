use serde::Deserialize;

/// User-visible strings. Hosts may override them from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub error_title: String,
    pub validation_error: String,
    /// `%label%` is replaced by the topic being processed.
    pub processing: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            error_title: "Error".to_string(),
            validation_error: "There was a validation error".to_string(),
            processing: "Processing %label% ...".to_string(),
        }
    }
}

impl Catalog {
    pub fn processing_label(&self, label: &str) -> String {
        self.processing.replace("%label%", label)
    }
}
