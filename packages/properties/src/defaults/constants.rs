//! Named class constants for `CLASS_FIELD` default values.
//!
//! Constants are registered up front instead of being looked up
//! dynamically; [`ConstantResolver`] is the only seam through which
//! `CLASS_FIELD` expressions reach them.

use std::collections::{HashMap, HashSet};

use crate::error::{PropertyError, Result};
use crate::types::Value;

/// Resolves `class.FIELD` references to values.
pub trait ConstantResolver {
    /// Look up `field` on `class`.
    ///
    /// # Errors
    /// `ClassNotFound`, `FieldNotFound`, `FieldNotAccessible` or
    /// `SecurityViolation`.
    fn resolve(&self, class: &str, field: &str) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq)]
struct Constant {
    value: Value,
    public: bool,
}

/// In-memory [`ConstantResolver`] populated at start-up.
///
/// # Examples
/// ```
/// use entirej_properties::{ConstantRegistry, ConstantResolver, Value};
///
/// let mut registry = ConstantRegistry::new();
/// registry.register("org.example.Defaults", "MAX_ROWS", Value::Int(50));
///
/// assert_eq!(registry.resolve("org.example.Defaults", "MAX_ROWS").unwrap(), Value::Int(50));
/// assert!(registry.resolve("org.example.Defaults", "MIN_ROWS").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstantRegistry {
    classes: HashMap<String, HashMap<String, Constant>>,
    denied: HashSet<String>,
}

impl ConstantRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a public constant.
    pub fn register(
        &mut self,
        class: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.insert(class.into(), field.into(), value.into(), true);
    }

    /// Register a constant that exists but may not be read.
    pub fn register_private(
        &mut self,
        class: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.insert(class.into(), field.into(), value.into(), false);
    }

    fn insert(&mut self, class: String, field: String, value: Value, public: bool) {
        self.classes
            .entry(class)
            .or_default()
            .insert(field, Constant { value, public });
    }

    /// Refuse every lookup on `class`, registered or not.
    pub fn deny_class(&mut self, class: impl Into<String>) {
        self.denied.insert(class.into());
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Number of registered constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConstantResolver for ConstantRegistry {
    fn resolve(&self, class: &str, field: &str) -> Result<Value> {
        if self.denied.contains(class) {
            return Err(PropertyError::SecurityViolation {
                class: class.to_string(),
                field: field.to_string(),
            });
        }
        let fields = self
            .classes
            .get(class)
            .ok_or_else(|| PropertyError::ClassNotFound(class.to_string()))?;
        let constant = fields
            .get(field)
            .ok_or_else(|| PropertyError::FieldNotFound {
                class: class.to_string(),
                field: field.to_string(),
            })?;
        if !constant.public {
            return Err(PropertyError::FieldNotAccessible {
                class: class.to_string(),
                field: field.to_string(),
            });
        }
        Ok(constant.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConstantRegistry {
        let mut registry = ConstantRegistry::new();
        registry.register("org.example.Defaults", "COUNTRY", "NL");
        registry.register_private("org.example.Defaults", "SECRET", "hunter2");
        registry.register("org.example.Internal", "FLAG", true);
        registry.deny_class("org.example.Internal");
        registry
    }

    #[test]
    fn test_resolve_public() {
        assert_eq!(
            registry().resolve("org.example.Defaults", "COUNTRY").unwrap(),
            Value::String("NL".to_string())
        );
    }

    #[test]
    fn test_resolve_failures() {
        let registry = registry();
        assert!(matches!(
            registry.resolve("org.example.Missing", "X"),
            Err(PropertyError::ClassNotFound(_))
        ));
        assert!(matches!(
            registry.resolve("org.example.Defaults", "X"),
            Err(PropertyError::FieldNotFound { .. })
        ));
        assert!(matches!(
            registry.resolve("org.example.Defaults", "SECRET"),
            Err(PropertyError::FieldNotAccessible { .. })
        ));
        assert!(matches!(
            registry.resolve("org.example.Internal", "FLAG"),
            Err(PropertyError::SecurityViolation { .. })
        ));
    }

    #[test]
    fn test_len() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert!(registry.has_class("org.example.Internal"));
        assert!(ConstantRegistry::new().is_empty());
    }
}
