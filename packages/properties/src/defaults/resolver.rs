//! Resolution of default-value expressions against runtime data.

use super::constants::ConstantResolver;
use super::expression::DefaultValue;
use super::source::DefaultValueSource;
use crate::error::{PropertyError, Result};
use crate::types::Value;

/// Resolves [`DefaultValue`] expressions.
///
/// Parameters and blocks come from the [`DefaultValueSource`] passed to each
/// call; class constants come from the resolver's [`ConstantResolver`].
pub struct DefaultValueResolver<'a> {
    constants: &'a dyn ConstantResolver,
}

impl<'a> DefaultValueResolver<'a> {
    #[must_use]
    pub fn new(constants: &'a dyn ConstantResolver) -> Self {
        Self { constants }
    }

    /// Parse and resolve a `TYPE_CODE:payload` expression.
    ///
    /// # Examples
    /// ```
    /// use entirej_properties::{Block, ConstantRegistry, DefaultValueResolver, FormState, Value};
    /// use std::collections::HashMap;
    ///
    /// let mut customers = Block::new("customers", ["name"]);
    /// customers.add_record(HashMap::from([("name".to_string(), Value::from("Jansen"))]));
    /// let mut form = FormState::new("orders");
    /// form.add_block(customers);
    ///
    /// let constants = ConstantRegistry::new();
    /// let resolver = DefaultValueResolver::new(&constants);
    /// assert_eq!(
    ///     resolver.resolve_str("BLOCK_ITEM:customers.name", &form).unwrap(),
    ///     Value::from("Jansen")
    /// );
    /// ```
    pub fn resolve_str(&self, expression: &str, source: &dyn DefaultValueSource) -> Result<Value> {
        let value: DefaultValue = expression.parse()?;
        self.resolve(&value, source)
    }

    /// Resolve a parsed expression.
    ///
    /// A block item whose block has no focused record resolves to
    /// [`Value::Null`].
    ///
    /// # Errors
    /// `ParameterNotFound`, `BlockNotFound`, `ItemNotFound`, or any error of
    /// the constant resolver.
    pub fn resolve(&self, value: &DefaultValue, source: &dyn DefaultValueSource) -> Result<Value> {
        tracing::debug!(expression = %value, form = %source.form_name(), "Resolving default value");
        match value {
            DefaultValue::ApplicationParameter(name) => source
                .application_parameter(name)
                .cloned()
                .ok_or_else(|| PropertyError::ParameterNotFound {
                    scope: "application",
                    name: name.clone(),
                }),
            DefaultValue::FormParameter(name) => source
                .form_parameter(name)
                .cloned()
                .ok_or_else(|| PropertyError::ParameterNotFound {
                    scope: "form",
                    name: name.clone(),
                }),
            DefaultValue::BlockItem { block, item } => {
                let found = source
                    .block(block)
                    .ok_or_else(|| PropertyError::BlockNotFound {
                        block: block.clone(),
                        form: source.form_name().to_string(),
                    })?;
                if !found.has_item(item) {
                    return Err(PropertyError::ItemNotFound {
                        block: block.clone(),
                        item: item.clone(),
                        form: source.form_name().to_string(),
                    });
                }
                Ok(found
                    .focused_record()
                    .and_then(|record| record.get(item))
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            DefaultValue::ClassField { class, field } => self.constants.resolve(class, field),
        }
    }
}
