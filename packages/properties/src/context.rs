//! Framework-wide configuration context.
//!
//! A `FrameworkContext` is created once at start-up and handed by reference
//! to the components that need framework properties, class constants or
//! translations.

use std::path::Path;

use crate::config::PATH_SEPARATOR;
use crate::defaults::{ConstantRegistry, DefaultValueResolver};
use crate::error::{PropertyError, Result};
use crate::group::PropertyGroup;
use crate::loader::load_properties_file;
use crate::translate::Translator;

/// Framework properties, class constants and translations.
pub struct FrameworkContext {
    properties: PropertyGroup,
    constants: ConstantRegistry,
    translator: Option<Box<dyn Translator>>,
}

impl FrameworkContext {
    #[must_use]
    pub fn new(properties: PropertyGroup) -> Self {
        Self {
            properties,
            constants: ConstantRegistry::new(),
            translator: None,
        }
    }

    /// Load the framework properties from an XML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_properties_file(path).map(Self::new)
    }

    #[must_use]
    pub fn with_constants(mut self, constants: ConstantRegistry) -> Self {
        self.constants = constants;
        self
    }

    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    #[must_use]
    pub fn properties(&self) -> &PropertyGroup {
        &self.properties
    }

    #[must_use]
    pub fn constants(&self) -> &ConstantRegistry {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut ConstantRegistry {
        &mut self.constants
    }

    /// Resolver for default values, backed by this context's constants.
    #[must_use]
    pub fn default_value_resolver(&self) -> DefaultValueResolver<'_> {
        DefaultValueResolver::new(&self.constants)
    }

    /// Effective properties of one extension.
    ///
    /// Takes a copy of the framework group at `group_path` as the declared
    /// defaults, merges `values` into it with
    /// [`PropertyGroup::copy_values_from_group`] and applies translations.
    ///
    /// # Errors
    /// `UnknownGroup` when `group_path` does not exist in the framework
    /// properties, or any error of the merge.
    pub fn extension_properties(
        &self,
        group_path: &str,
        values: &PropertyGroup,
    ) -> Result<PropertyGroup> {
        let declared = self.properties.find_group(group_path).ok_or_else(|| {
            let mut group = &self.properties;
            let segment = group_path
                .split(PATH_SEPARATOR)
                .find(|segment| match group.group(segment) {
                    Some(child) => {
                        group = child;
                        false
                    }
                    None => true,
                })
                .unwrap_or(group_path);
            PropertyError::UnknownGroup {
                path: group_path.to_string(),
                segment: segment.to_string(),
            }
        })?;

        let mut effective = declared.to_detached();
        effective.copy_values_from_group(values)?;
        if let Some(translator) = &self.translator {
            effective.translate(translator.as_ref());
        }
        Ok(effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_properties;
    use crate::types::Value;
    use crate::defaults::FormState;
    use std::collections::HashMap;

    const FRAMEWORK_XML: &str = r#"<frameworkProperties>
        <propertyGroup name="renderers">
            <propertyGroup name="grid">
                <property name="title" multilingual="true">GRID_TITLE</property>
                <property name="rowHeight" propertyType="INTEGER">20</property>
                <propertyGroup name="header">
                    <property name="visible" propertyType="BOOLEAN">true</property>
                </propertyGroup>
            </propertyGroup>
        </propertyGroup>
    </frameworkProperties>"#;

    fn context() -> FrameworkContext {
        let mut translations = HashMap::new();
        translations.insert("GRID_TITLE".to_string(), "Orders".to_string());
        FrameworkContext::new(parse_properties(FRAMEWORK_XML).unwrap())
            .with_translator(translations)
    }

    #[test]
    fn test_extension_properties_merges_and_translates() {
        let form_values = parse_properties(
            r#"<values>
                <property name="rowHeight">32</property>
                <propertyGroup name="header">
                    <property name="visible">false</property>
                </propertyGroup>
            </values>"#,
        )
        .unwrap();

        let effective = context()
            .extension_properties("renderers.grid", &form_values)
            .unwrap();

        assert_eq!(effective.get_int_property("rowHeight", 0).unwrap(), 32);
        assert!(!effective.get_boolean_property("header.visible", true).unwrap());
        assert_eq!(effective.get_string_property("title"), Some("Orders"));
    }

    #[test]
    fn test_extension_properties_unknown_group() {
        let err = context()
            .extension_properties("renderers.tree", &PropertyGroup::new("values"))
            .unwrap_err();
        assert!(matches!(
            err,
            PropertyError::UnknownGroup { segment, .. } if segment == "tree"
        ));
    }

    #[test]
    fn test_framework_properties_are_not_modified() {
        let context = context();
        let mut values = PropertyGroup::new("values");
        values.add_property(crate::property::Property::new("rowHeight").with_value("99"));
        context.extension_properties("renderers.grid", &values).unwrap();

        assert_eq!(
            context
                .properties()
                .get_string_property("renderers.grid.rowHeight"),
            Some("20")
        );
    }

    #[test]
    fn test_default_value_resolver_uses_constants() {
        let mut context = context();
        context
            .constants_mut()
            .register("org.example.Defaults", "PAGE_SIZE", 25_i64);

        let form = FormState::new("orders");
        let value = context
            .default_value_resolver()
            .resolve_str("CLASS_FIELD:org.example.Defaults.PAGE_SIZE", &form)
            .unwrap();
        assert_eq!(value, Value::Int(25));
    }
}
