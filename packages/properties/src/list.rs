//! Property lists: ordered rows of flat name/value records.

use std::collections::BTreeMap;

/// One row of a [`PropertyList`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyListEntry {
    properties: BTreeMap<String, String>,
}

impl PropertyListEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value with the same name.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Builder form of [`set_property`](Self::set_property).
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A named, ordered list of entries.
///
/// Entry order is insertion order and is kept when lists are copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyList {
    name: String,
    entries: Vec<PropertyListEntry>,
}

impl PropertyList {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_entry(&mut self, entry: PropertyListEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[PropertyListEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all current entries and take copies of `entries`, in order.
    pub fn replace_entries(&mut self, entries: &[PropertyListEntry]) {
        self.entries = entries.to_vec();
    }
}
