use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Name of the mandatory form field holding the topic (or topic list).
pub const TOPIC_FIELD: &str = "Topic";

const JOIN_PARAM: &str = "join";

/// Validated, serialized form data for one export RPC call.
///
/// Only non-empty values are ever stored. The `join` flag is not a form
/// field; it is added for the final PDF call and serialized as `"join": 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportRequest {
    fields: BTreeMap<String, String>,
    join: bool,
}

impl ExportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. Empty values are omitted, matching form serialization.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn topic(&self) -> Option<&str> {
        self.get(TOPIC_FIELD)
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.insert(TOPIC_FIELD, topic);
    }

    pub fn is_join(&self) -> bool {
        self.join
    }

    pub fn set_join(&mut self, join: bool) {
        self.join = join;
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ExportRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (name, value) in iter {
            request.insert(name, value);
        }
        request
    }
}

impl Serialize for ExportRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The flag wins over a form field of the same name.
        let shadowed = self.join && self.fields.contains_key(JOIN_PARAM);
        let len = self.fields.len() + usize::from(self.join) - usize::from(shadowed);
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in &self.fields {
            if self.join && name == JOIN_PARAM {
                continue;
            }
            map.serialize_entry(name, value)?;
        }
        if self.join {
            map.serialize_entry(JOIN_PARAM, &1u8)?;
        }
        map.end()
    }
}
