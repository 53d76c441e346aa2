//! Property groups: the hierarchical, dot-addressed configuration tree.
//!
//! A group owns its properties, property lists and child groups. Nested
//! values are addressed with dotted paths such as
//! `"displayCoordinates.xpos"`, where every segment but the last names a
//! child group.
//!
//! # Reads versus writes
//!
//! Path resolution never creates groups. An unknown group segment makes a
//! read return `None` but makes a write fail with
//! [`PropertyError::UnknownGroup`]. A write to a property that the resolved
//! group never declared is silently ignored; callers that need to know
//! should check [`PropertyGroup::contains_property`] first.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::PATH_SEPARATOR;
use crate::error::{PropertyError, Result};
use crate::list::PropertyList;
use crate::property::Property;
use crate::translate::Translator;

/// A named node in the property tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    name: String,
    /// Full path of the parent; `None` for the root.
    parent_path: Option<String>,
    properties: BTreeMap<String, Property>,
    groups: BTreeMap<String, PropertyGroup>,
    lists: BTreeMap<String, PropertyList>,
}

/// Split `"a.b.c"` into `(Some("a.b"), "c")`.
fn split_path(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once(PATH_SEPARATOR) {
        Some((groups, name)) => (Some(groups), name),
        None => (None, path),
    }
}

impl PropertyGroup {
    /// Create a detached root group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_path: None,
            properties: BTreeMap::new(),
            groups: BTreeMap::new(),
            lists: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for a group that has not been attached to a parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_path.is_none()
    }

    /// Dotted path of this group from the root of its tree.
    ///
    /// The root itself has an empty path, its children have just their name.
    ///
    /// # Examples
    /// ```
    /// use entirej_properties::PropertyGroup;
    ///
    /// let mut root = PropertyGroup::new("root");
    /// let mut display = PropertyGroup::new("display");
    /// display.add_group(PropertyGroup::new("coordinates"));
    /// root.add_group(display);
    ///
    /// assert_eq!(root.full_group_name(), "");
    /// let coordinates = root.find_group("display.coordinates").unwrap();
    /// assert_eq!(coordinates.full_group_name(), "display.coordinates");
    /// ```
    #[must_use]
    pub fn full_group_name(&self) -> String {
        match self.parent_path.as_deref() {
            None => String::new(),
            Some("") => self.name.clone(),
            Some(parent) => format!("{parent}{PATH_SEPARATOR}{}", self.name),
        }
    }

    /// Record the parent's path on this group and refresh the subtree.
    fn attach(&mut self, parent_path: String) {
        self.parent_path = Some(parent_path);
        let own_path = self.full_group_name();
        for child in self.groups.values_mut() {
            child.attach(own_path.clone());
        }
    }

    /// Clone this group as the root of a new tree.
    #[must_use]
    pub fn to_detached(&self) -> PropertyGroup {
        let mut copy = self.clone();
        copy.parent_path = None;
        for child in copy.groups.values_mut() {
            child.attach(String::new());
        }
        copy
    }

    /// Add a property, returning the one it replaced.
    pub fn add_property(&mut self, property: Property) -> Option<Property> {
        self.properties.insert(property.name().to_string(), property)
    }

    /// Attach a child group, returning the one it replaced.
    pub fn add_group(&mut self, mut group: PropertyGroup) -> Option<PropertyGroup> {
        group.attach(self.full_group_name());
        self.groups.insert(group.name.clone(), group)
    }

    /// Add a property list, returning the one it replaced.
    pub fn add_list(&mut self, list: PropertyList) -> Option<PropertyList> {
        self.lists.insert(list.name().to_string(), list)
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn contains_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&PropertyGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut PropertyGroup> {
        self.groups.get_mut(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &PropertyGroup> {
        self.groups.values()
    }

    #[must_use]
    pub fn property_list(&self, name: &str) -> Option<&PropertyList> {
        self.lists.get(name)
    }

    pub fn property_lists(&self) -> impl Iterator<Item = &PropertyList> {
        self.lists.values()
    }

    /// Number of properties in this group and all descendants.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len() + self.groups.values().map(Self::property_count).sum::<usize>()
    }

    /// Resolve a dotted group path relative to this group.
    ///
    /// The empty path resolves to `self`.
    #[must_use]
    pub fn find_group(&self, path: &str) -> Option<&PropertyGroup> {
        if path.is_empty() {
            return Some(self);
        }
        path.split(PATH_SEPARATOR)
            .try_fold(self, |group, segment| group.groups.get(segment))
    }

    fn find_group_mut(&mut self, path: &str) -> Option<&mut PropertyGroup> {
        if path.is_empty() {
            return Some(self);
        }
        path.split(PATH_SEPARATOR)
            .try_fold(self, |group, segment| group.groups.get_mut(segment))
    }

    /// Resolve the property a dotted path points at, if both the groups and
    /// the property exist.
    fn find_property(&self, path: &str) -> Option<&Property> {
        let (group_path, name) = split_path(path);
        let group = match group_path {
            Some(group_path) => self.find_group(group_path)?,
            None => self,
        };
        group.properties.get(name)
    }

    /// Read a property value by dotted path.
    ///
    /// Returns `None` when a group on the path does not exist, when the
    /// property is not declared, or when its value is absent or blank. A
    /// present value is returned untrimmed.
    ///
    /// # Examples
    /// ```
    /// use entirej_properties::{Property, PropertyGroup};
    ///
    /// let mut display = PropertyGroup::new("displayCoordinates");
    /// display.add_property(Property::new("xpos").with_value("10"));
    /// let mut root = PropertyGroup::new("root");
    /// root.add_group(display);
    ///
    /// assert_eq!(root.get_string_property("displayCoordinates.xpos"), Some("10"));
    /// assert_eq!(root.get_string_property("missing.xpos"), None);
    /// ```
    #[must_use]
    pub fn get_string_property(&self, path: &str) -> Option<&str> {
        self.find_property(path)?
            .value()
            .filter(|value| !value.trim().is_empty())
    }

    /// Update a declared property by dotted path.
    ///
    /// # Errors
    /// Returns `UnknownGroup` when a group segment of the path does not
    /// exist. Writing to a property that was never declared in the resolved
    /// group is ignored and returns `Ok(())`.
    pub fn set_property_value(&mut self, path: &str, value: Option<String>) -> Result<()> {
        let (group_path, name) = split_path(path);

        let mut group = self;
        if let Some(group_path) = group_path {
            for segment in group_path.split(PATH_SEPARATOR) {
                group = group
                    .groups
                    .get_mut(segment)
                    .ok_or_else(|| PropertyError::UnknownGroup {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })?;
            }
        }

        match group.properties.get_mut(name) {
            Some(property) => property.set_value(value),
            None => tracing::debug!(
                path = %path,
                group = %group.full_group_name(),
                "Ignoring value for undeclared property"
            ),
        }
        Ok(())
    }

    /// Read a boolean property, falling back to `default` when absent or blank.
    ///
    /// # Errors
    /// Returns `Conversion` unless the value is `true` or `false`, ignoring
    /// case.
    pub fn get_boolean_property(&self, path: &str, default: bool) -> Result<bool> {
        let Some(value) = self.get_string_property(path) else {
            return Ok(default);
        };
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(conversion_error(path, value, "boolean"))
        }
    }

    /// Read an integer property, falling back to `default` when absent or blank.
    ///
    /// # Errors
    /// Returns `Conversion` when the value is not a valid `i32`.
    pub fn get_int_property(&self, path: &str, default: i32) -> Result<i32> {
        self.parse_property(path, default, "int")
    }

    /// Read a float property, falling back to `default` when absent or blank.
    ///
    /// # Errors
    /// Returns `Conversion` when the value is not a finite `f32`; `NaN` and
    /// infinities are rejected.
    pub fn get_float_property(&self, path: &str, default: f32) -> Result<f32> {
        self.parse_finite(path, default, "float")
    }

    /// Read a double property, falling back to `default` when absent or blank.
    ///
    /// # Errors
    /// Returns `Conversion` when the value is not a finite `f64`.
    pub fn get_double_property(&self, path: &str, default: f64) -> Result<f64> {
        self.parse_finite(path, default, "double")
    }

    fn parse_property<T: FromStr>(&self, path: &str, default: T, target: &'static str) -> Result<T> {
        match self.get_string_property(path) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| conversion_error(path, value, target)),
        }
    }

    fn parse_finite<T>(&self, path: &str, default: T, target: &'static str) -> Result<T>
    where
        T: FromStr + Copy + Into<f64>,
    {
        match self.get_string_property(path) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<T>()
                .ok()
                .filter(|parsed| Into::<f64>::into(*parsed).is_finite())
                .ok_or_else(|| conversion_error(path, value, target)),
        }
    }

    /// Check whether a declared property has no value.
    ///
    /// # Errors
    /// Returns `UndeclaredProperty` when no property exists at `path`.
    pub fn is_property_value_null(&self, path: &str) -> Result<bool> {
        self.find_property(path)
            .map(Property::is_value_null)
            .ok_or_else(|| PropertyError::UndeclaredProperty(path.to_string()))
    }

    /// Merge the values of another tree into this one.
    ///
    /// `source` is addressed by its full group name, so `self` is expected
    /// to be the root of a tree with the same shape:
    ///
    /// - every property of `source` is written to the matching path with
    ///   [`set_property_value`](Self::set_property_value)
    /// - every list of `source` replaces the entries of the list with the
    ///   same name in the matching group, if that list is declared there
    /// - child groups of `source` are merged recursively
    ///
    /// No groups, properties or lists are created.
    ///
    /// The merge is all or nothing: on error `self` is left unchanged.
    ///
    /// # Errors
    /// Returns `UnknownGroup` when a group holding one of the source's
    /// properties has no counterpart in this tree.
    pub fn copy_values_from_group(&mut self, source: &PropertyGroup) -> Result<()> {
        let mut merged = self.clone();
        merged.merge_values(source)?;
        *self = merged;
        Ok(())
    }

    fn merge_values(&mut self, source: &PropertyGroup) -> Result<()> {
        let prefix = source.full_group_name();

        for property in source.properties.values() {
            let path = if prefix.is_empty() {
                property.name().to_string()
            } else {
                format!("{prefix}{PATH_SEPARATOR}{}", property.name())
            };
            self.set_property_value(&path, property.value().map(str::to_string))?;
        }

        if !source.lists.is_empty() {
            match self.find_group_mut(&prefix) {
                Some(target) => {
                    for list in source.lists.values() {
                        match target.lists.get_mut(list.name()) {
                            Some(existing) => existing.replace_entries(list.entries()),
                            None => tracing::debug!(
                                group = %prefix,
                                list = %list.name(),
                                "Skipping list not declared in target"
                            ),
                        }
                    }
                }
                None => tracing::debug!(
                    group = %prefix,
                    "Skipping lists of group missing in target"
                ),
            }
        }

        for child in source.groups.values() {
            self.merge_values(child)?;
        }
        Ok(())
    }

    /// Apply translations to every multilingual property in this subtree.
    ///
    /// The raw value is the translation key; properties without a raw value
    /// or without a translation are left as they are.
    pub fn translate(&mut self, translator: &dyn Translator) {
        for property in self.properties.values_mut() {
            if !property.is_multilingual() {
                continue;
            }
            if let Some(translated) = property.raw_value().and_then(|key| translator.translate(key))
            {
                property.apply_translation(translated);
            }
        }
        for child in self.groups.values_mut() {
            child.translate(translator);
        }
    }
}

fn conversion_error(path: &str, value: &str, target: &'static str) -> PropertyError {
    PropertyError::Conversion {
        name: path.to_string(),
        value: value.to_string(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::PropertyListEntry;
    use crate::property::PropertyType;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// root
    ///   title = "Orders"
    ///   retries = "abc"
    ///   displayCoordinates
    ///     ypos = "5"
    ///   columns: []
    fn sample_tree() -> PropertyGroup {
        let mut display = PropertyGroup::new("displayCoordinates");
        display.add_property(Property::new("ypos").with_value("5"));

        let mut root = PropertyGroup::new("root");
        root.add_property(Property::new("title").with_value("Orders"));
        root.add_property(Property::new("retries").with_value("abc"));
        root.add_group(display);
        root.add_list(PropertyList::new("columns"));
        root
    }

    #[test]
    fn test_full_group_name() {
        let mut inner = PropertyGroup::new("inner");
        inner.add_group(PropertyGroup::new("leaf"));
        let mut outer = PropertyGroup::new("outer");
        outer.add_group(inner);
        let mut root = PropertyGroup::new("root");
        root.add_group(outer);

        assert_eq!(root.full_group_name(), "");
        assert!(root.is_root());
        assert_eq!(root.find_group("outer").unwrap().full_group_name(), "outer");
        assert_eq!(
            root.find_group("outer.inner.leaf").unwrap().full_group_name(),
            "outer.inner.leaf"
        );
    }

    #[test]
    fn test_child_name_extends_parent_name() {
        let root = sample_tree();
        for child in root.groups() {
            let parent = root.full_group_name();
            let expected = if parent.is_empty() {
                child.name().to_string()
            } else {
                format!("{parent}.{}", child.name())
            };
            assert_eq!(child.full_group_name(), expected);
        }
    }

    #[test]
    fn test_get_string_property() {
        let root = sample_tree();
        assert_eq!(root.get_string_property("title"), Some("Orders"));
        assert_eq!(root.get_string_property("displayCoordinates.ypos"), Some("5"));
        assert_eq!(root.get_string_property("displayCoordinates.xpos"), None);
        assert_eq!(root.get_string_property("nowhere.ypos"), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut root = sample_tree();
        root.set_property_value("displayCoordinates.ypos", Some(" 7 ".to_string()))
            .unwrap();
        assert_eq!(root.get_string_property("displayCoordinates.ypos"), Some(" 7 "));

        root.set_property_value("displayCoordinates.ypos", Some("   ".to_string()))
            .unwrap();
        assert_eq!(root.get_string_property("displayCoordinates.ypos"), None);
    }

    #[test]
    fn test_set_unknown_group_is_an_error() {
        let mut root = sample_tree();
        let err = root
            .set_property_value("layout.width", Some("1".to_string()))
            .unwrap_err();
        match err {
            PropertyError::UnknownGroup { path, segment } => {
                assert_eq!(path, "layout.width");
                assert_eq!(segment, "layout");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_set_undeclared_property_is_ignored() {
        let mut root = sample_tree();
        root.set_property_value("displayCoordinates.xpos", Some("10".to_string()))
            .unwrap();
        assert_eq!(root.get_string_property("displayCoordinates.xpos"), None);
        assert!(!root
            .group("displayCoordinates")
            .unwrap()
            .contains_property("xpos"));
    }

    #[test]
    fn test_typed_getters_use_default_when_blank() {
        let mut root = PropertyGroup::new("root");
        root.add_property(Property::new("blank").with_value("  "));
        root.add_property(Property::new("unset"));

        for path in ["blank", "unset", "missing", "no.such.path"] {
            assert!(root.get_boolean_property(path, true).unwrap());
            assert_eq!(root.get_int_property(path, 5).unwrap(), 5);
            assert_eq!(root.get_float_property(path, 1.5).unwrap(), 1.5);
            assert_eq!(root.get_double_property(path, 2.25).unwrap(), 2.25);
        }
    }

    #[test]
    fn test_typed_getters_parse_values() {
        let mut root = PropertyGroup::new("root");
        root.add_property(Property::new("enabled").with_value("TRUE"));
        root.add_property(Property::new("count").with_value("42"));
        root.add_property(Property::new("ratio").with_value("0.5"));

        assert!(root.get_boolean_property("enabled", false).unwrap());
        assert_eq!(root.get_int_property("count", 0).unwrap(), 42);
        assert_eq!(root.get_float_property("ratio", 0.0).unwrap(), 0.5);
        assert_eq!(root.get_double_property("count", 0.0).unwrap(), 42.0);
    }

    #[test]
    fn test_float_getters_reject_non_finite() {
        let mut root = PropertyGroup::new("root");
        root.add_property(Property::new("inf").with_value("inf"));
        root.add_property(Property::new("nan").with_value("NaN"));
        root.add_property(Property::new("big").with_value("Infinity"));

        assert!(matches!(
            root.get_float_property("inf", 0.0),
            Err(PropertyError::Conversion { target: "float", .. })
        ));
        assert!(matches!(
            root.get_double_property("nan", 0.0),
            Err(PropertyError::Conversion { target: "double", .. })
        ));
        assert!(root.get_double_property("big", 0.0).is_err());
        assert_eq!(root.get_double_property("missing", 1.5).unwrap(), 1.5);
    }

    #[test]
    fn test_int_conversion_error() {
        let root = sample_tree();
        let err = root.get_int_property("retries", 5).unwrap_err();
        assert_eq!(err.message_key(), "ej.properties.conversion_failed");
        assert_eq!(err.args(), vec!["retries", "abc", "int"]);
    }

    #[test]
    fn test_boolean_accepts_only_true_false() {
        let mut root = PropertyGroup::new("root");
        for (name, value) in [("a", "yes"), ("b", "1"), ("c", "on"), ("d", "False")] {
            root.add_property(Property::new(name).with_value(value));
        }
        assert!(root.get_boolean_property("a", false).is_err());
        assert!(root.get_boolean_property("b", false).is_err());
        assert!(root.get_boolean_property("c", false).is_err());
        assert!(!root.get_boolean_property("d", true).unwrap());
    }

    #[test]
    fn test_is_property_value_null() {
        let mut root = sample_tree();
        root.add_property(Property::new("empty").with_type(PropertyType::Integer));

        assert!(root.is_property_value_null("empty").unwrap());
        assert!(!root.is_property_value_null("title").unwrap());
        assert!(!root.is_property_value_null("displayCoordinates.ypos").unwrap());
        assert!(matches!(
            root.is_property_value_null("undeclared"),
            Err(PropertyError::UndeclaredProperty(name)) if name == "undeclared"
        ));
    }

    #[test]
    fn test_copy_values_overwrites_properties_and_replaces_lists() {
        let mut target = sample_tree();
        {
            let mut columns = PropertyList::new("columns");
            columns.add_entry(PropertyListEntry::new().with_property("width", "99"));
            target.add_list(columns);
        }

        let mut source = PropertyGroup::new("source");
        source.add_property(Property::new("title").with_value("Invoices"));
        let mut columns = PropertyList::new("columns");
        columns.add_entry(PropertyListEntry::new().with_property("width", "10"));
        columns.add_entry(PropertyListEntry::new().with_property("width", "20"));
        source.add_list(columns);
        source.add_list(PropertyList::new("undeclared"));
        let mut display = PropertyGroup::new("displayCoordinates");
        display.add_property(Property::new("ypos").with_value("8"));
        source.add_group(display);

        target.copy_values_from_group(&source).unwrap();

        assert_eq!(target.get_string_property("title"), Some("Invoices"));
        assert_eq!(target.get_string_property("displayCoordinates.ypos"), Some("8"));

        let columns = target.property_list("columns").unwrap();
        let widths: Vec<_> = columns
            .entries()
            .iter()
            .filter_map(|e| e.property("width"))
            .collect();
        assert_eq!(widths, vec!["10", "20"]);
        assert!(target.property_list("undeclared").is_none());
    }

    #[test]
    fn test_copy_values_is_idempotent() {
        let mut source = sample_tree();
        source
            .set_property_value("title", Some("Copied".to_string()))
            .unwrap();
        source
            .set_property_value("displayCoordinates.ypos", Some("12".to_string()))
            .unwrap();

        let mut once = sample_tree();
        once.copy_values_from_group(&source).unwrap();
        let mut twice = once.clone();
        twice.copy_values_from_group(&source).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_copy_values_requires_matching_groups() {
        let mut target = PropertyGroup::new("root");
        let mut source = PropertyGroup::new("root");
        let mut layout = PropertyGroup::new("layout");
        layout.add_property(Property::new("width").with_value("3"));
        source.add_group(layout);

        assert!(matches!(
            target.copy_values_from_group(&source),
            Err(PropertyError::UnknownGroup { segment, .. }) if segment == "layout"
        ));
    }

    #[test]
    fn test_failed_copy_leaves_target_unchanged() {
        let mut target = PropertyGroup::new("root");
        target.add_property(Property::new("title").with_value("old"));
        let before = target.clone();

        let mut source = PropertyGroup::new("root");
        source.add_property(Property::new("title").with_value("new"));
        let mut layout = PropertyGroup::new("layout");
        layout.add_property(Property::new("width").with_value("3"));
        source.add_group(layout);

        assert!(target.copy_values_from_group(&source).is_err());
        assert_eq!(target.get_string_property("title"), Some("old"));
        assert_eq!(target, before);
    }

    #[test]
    fn test_translate_multilingual_only() {
        let mut root = PropertyGroup::new("root");
        root.add_property(
            Property::new("label")
                .with_value("CUSTOMER")
                .with_multilingual(true),
        );
        root.add_property(Property::new("code").with_value("CUSTOMER"));

        let mut translations = HashMap::new();
        translations.insert("CUSTOMER".to_string(), "Kunde".to_string());
        root.translate(&translations);

        assert_eq!(root.get_string_property("label"), Some("Kunde"));
        assert_eq!(root.get_string_property("code"), Some("CUSTOMER"));
    }

    #[test]
    fn test_to_detached_reroots_subtree() {
        let mut margins = PropertyGroup::new("margins");
        margins.add_property(Property::new("top").with_value("4"));
        let mut display = PropertyGroup::new("display");
        display.add_group(margins);
        let mut root = PropertyGroup::new("root");
        root.add_group(display);

        let detached = root.group("display").unwrap().to_detached();
        assert!(detached.is_root());
        assert_eq!(detached.full_group_name(), "");
        assert_eq!(detached.group("margins").unwrap().full_group_name(), "margins");
        assert_eq!(detached.get_string_property("margins.top"), Some("4"));
    }

    #[test]
    fn test_property_count() {
        assert_eq!(sample_tree().property_count(), 3);
    }
}
