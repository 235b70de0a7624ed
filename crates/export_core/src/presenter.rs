use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    /// Not raised by the export widgets themselves; hosts may show one.
    Success,
}

/// Text of a visible banner, already prefixed with its optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: MessageKind,
    pub text: String,
}

/// Error/success banners plus the set of fields decorated as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePresenter {
    error: Option<String>,
    success: Option<String>,
    error_fields: BTreeSet<String>,
}

impl MessagePresenter {
    pub fn show(&mut self, kind: MessageKind, message: &str, title: Option<&str>) {
        let text = match title {
            Some(title) if !title.is_empty() => format!("{title}: {message}"),
            _ => message.to_string(),
        };
        match kind {
            MessageKind::Error => self.error = Some(text),
            MessageKind::Success => self.success = Some(text),
        }
    }

    /// Hides both banners and strips every field decoration.
    pub fn hide_all(&mut self) {
        self.error = None;
        self.success = None;
        self.error_fields.clear();
    }

    pub fn decorate(&mut self, field: impl Into<String>) {
        self.error_fields.insert(field.into());
    }

    pub fn banner(&self) -> Option<Banner> {
        self.error
            .as_ref()
            .map(|text| Banner {
                kind: MessageKind::Error,
                text: text.clone(),
            })
            .or_else(|| {
                self.success.as_ref().map(|text| Banner {
                    kind: MessageKind::Success,
                    text: text.clone(),
                })
            })
    }

    pub fn error_fields(&self) -> impl Iterator<Item = &str> {
        self.error_fields.iter().map(String::as_str)
    }
}
