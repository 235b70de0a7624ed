use std::collections::HashMap;
use std::fmt;

/// Identity of a host element a widget is mounted on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns at most one controller per element.
#[derive(Debug)]
pub struct WidgetRegistry<C> {
    widgets: HashMap<ElementId, C>,
}

impl<C> Default for WidgetRegistry<C> {
    fn default() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }
}

impl<C> WidgetRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a controller built by `make` unless the element already has one.
    /// Returns `true` when a new controller was created.
    pub fn mount(&mut self, id: ElementId, make: impl FnOnce() -> C) -> bool {
        if self.widgets.contains_key(&id) {
            return false;
        }
        self.widgets.insert(id, make());
        true
    }

    pub fn get(&self, id: &ElementId) -> Option<&C> {
        self.widgets.get(id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
