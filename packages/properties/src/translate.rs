//! Translation of multilingual property values.

use std::collections::{BTreeMap, HashMap};

/// Source of translations for multilingual property values.
///
/// The raw value of a multilingual property is used as the lookup key.
pub trait Translator {
    /// Return the translation for `key`, or `None` to keep the raw value.
    fn translate(&self, key: &str) -> Option<String>;
}

impl Translator for HashMap<String, String> {
    fn translate(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Translator for BTreeMap<String, String> {
    fn translate(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
