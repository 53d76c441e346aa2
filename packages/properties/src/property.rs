//! A single named, typed property value.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Kinds of property a framework extension can declare.
///
/// Parsed case-insensitively from the `propertyType` attribute.
///
/// # Examples
/// ```
/// use entirej_properties::PropertyType;
///
/// let kind: PropertyType = "visual_attribute".parse().unwrap();
/// assert_eq!(kind, PropertyType::VisualAttribute);
/// assert_eq!(kind.as_ref(), "VISUAL_ATTRIBUTE");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PropertyType {
    /// Free text.
    #[default]
    String,
    /// `true` or `false`.
    Boolean,
    /// Whole number.
    Integer,
    /// Single precision number.
    Float,
    /// Double precision number.
    Double,
    /// Command passed to an action processor.
    ActionCommand,
    /// Name of a visual attribute.
    VisualAttribute,
    /// Name of a block on the form.
    BlockName,
    /// Name of an item within a block.
    BlockItem,
    /// Name of an LOV definition.
    LovDefinition,
    /// LOV definition together with its item mapping.
    LovDefinitionWithItems,
    /// Name of a menu group.
    MenuGroup,
    /// Fully qualified name of a project class.
    ProjectClassFile,
    /// Display/edit format mask.
    CustomFormat,
    /// Default-value expression (`TYPE_CODE:payload`).
    DefaultValue,
}

/// A named property inside a [`PropertyGroup`](crate::PropertyGroup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    property_type: PropertyType,
    name: String,
    raw_value: Option<String>,
    translated_value: Option<String>,
    multilingual: bool,
    mandatory: bool,
}

impl Property {
    /// Create a string property without a value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            property_type: PropertyType::String,
            name: name.into(),
            raw_value: None,
            translated_value: None,
            multilingual: false,
            mandatory: false,
        }
    }

    /// Set the property kind.
    #[must_use]
    pub fn with_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }

    /// Set the initial raw value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.raw_value = Some(value.into());
        self
    }

    /// Mark the property as multilingual.
    #[must_use]
    pub fn with_multilingual(mut self, multilingual: bool) -> Self {
        self.multilingual = multilingual;
        self
    }

    /// Mark the property as mandatory.
    #[must_use]
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    #[must_use]
    pub fn is_multilingual(&self) -> bool {
        self.multilingual
    }

    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// The value as read from the definition, ignoring translations.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    /// The effective value: the translation if one was applied, otherwise
    /// the raw value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.translated_value
            .as_deref()
            .or(self.raw_value.as_deref())
    }

    /// Replace the raw value. Any applied translation is discarded.
    pub fn set_value(&mut self, value: Option<String>) {
        self.raw_value = value;
        self.translated_value = None;
    }

    /// Store a translation of the raw value.
    pub fn apply_translation(&mut self, translated: impl Into<String>) {
        self.translated_value = Some(translated.into());
    }

    /// True if the effective value is absent or blank.
    #[must_use]
    pub fn is_value_null(&self) -> bool {
        self.value().is_none_or(|v| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_property_type_parse_case_insensitive() {
        assert_eq!("BOOLEAN".parse::<PropertyType>().ok(), Some(PropertyType::Boolean));
        assert_eq!("boolean".parse::<PropertyType>().ok(), Some(PropertyType::Boolean));
        assert_eq!(
            "Lov_Definition_With_Items".parse::<PropertyType>().ok(),
            Some(PropertyType::LovDefinitionWithItems)
        );
        assert!("COLOUR".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_property_type_names_round_trip() {
        for kind in PropertyType::iter() {
            assert_eq!(kind.as_ref().parse::<PropertyType>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_value_defaults_to_raw() {
        let prop = Property::new("label").with_value("Customer");
        assert_eq!(prop.value(), Some("Customer"));
        assert_eq!(prop.raw_value(), Some("Customer"));
    }

    #[test]
    fn test_translation_overrides_raw_until_set() {
        let mut prop = Property::new("label")
            .with_value("CUSTOMER_LABEL")
            .with_multilingual(true);
        prop.apply_translation("Kunde");
        assert_eq!(prop.value(), Some("Kunde"));
        assert_eq!(prop.raw_value(), Some("CUSTOMER_LABEL"));

        prop.set_value(Some("ORDER_LABEL".to_string()));
        assert_eq!(prop.value(), Some("ORDER_LABEL"));
    }

    #[test]
    fn test_is_value_null() {
        assert!(Property::new("a").is_value_null());
        assert!(Property::new("a").with_value("   ").is_value_null());
        assert!(!Property::new("a").with_value(" x ").is_value_null());
    }
}
