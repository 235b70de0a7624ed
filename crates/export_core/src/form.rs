use serde::Deserialize;

use crate::ExportRequest;

/// One form control as captured by the host when the trigger fires.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required: false,
        }
    }

    pub fn required(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(name, value)
        }
    }
}

/// The form state at trigger time, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    pub fields: Vec<FormField>,
}

impl FormSnapshot {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }
}

impl FromIterator<FormField> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Why a submission was rejected before any RPC call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Required fields that were empty; these get an error decoration.
    pub empty_required: Vec<String>,
    pub missing_topic: bool,
}

/// Builds the export request from every field with a non-empty value.
///
/// Repeated names keep the last value.
pub fn serialize_form(form: &FormSnapshot) -> ExportRequest {
    form.fields
        .iter()
        .map(|field| (field.name.as_str(), field.value.as_str()))
        .collect()
}

/// Checks required fields against the form and `Topic` against the request.
pub fn validate(form: &FormSnapshot, request: &ExportRequest) -> Result<(), ValidationFailure> {
    let empty_required: Vec<String> = form
        .fields
        .iter()
        .filter(|field| field.required && field.value.is_empty())
        .map(|field| field.name.clone())
        .collect();
    let missing_topic = request.topic().is_none();

    if empty_required.is_empty() && !missing_topic {
        Ok(())
    } else {
        Err(ValidationFailure {
            empty_required,
            missing_topic,
        })
    }
}
