//! Parsing of `TYPE_CODE:payload` default-value expressions.

use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{PropertyError, Result};

/// Where a default value is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DefaultValueType {
    /// An application-level parameter.
    AppParameter,
    /// A parameter of the owning form.
    FormParameter,
    /// An item of the focused record of another block.
    BlockItem,
    /// A public constant registered for a class.
    ClassField,
}

/// A parsed default-value expression.
///
/// # Examples
/// ```
/// use entirej_properties::DefaultValue;
///
/// let value: DefaultValue = "BLOCK_ITEM:customers.name".parse().unwrap();
/// assert_eq!(
///     value,
///     DefaultValue::BlockItem { block: "customers".into(), item: "name".into() }
/// );
/// assert_eq!(value.to_string(), "BLOCK_ITEM:customers.name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    ApplicationParameter(String),
    FormParameter(String),
    BlockItem { block: String, item: String },
    ClassField { class: String, field: String },
}

impl DefaultValue {
    #[must_use]
    pub fn value_type(&self) -> DefaultValueType {
        match self {
            Self::ApplicationParameter(_) => DefaultValueType::AppParameter,
            Self::FormParameter(_) => DefaultValueType::FormParameter,
            Self::BlockItem { .. } => DefaultValueType::BlockItem,
            Self::ClassField { .. } => DefaultValueType::ClassField,
        }
    }
}

/// Split `payload` at its last dot into two non-empty halves.
fn split_qualified<'a>(payload: &'a str, text: &str) -> Result<(&'a str, &'a str)> {
    payload
        .rsplit_once('.')
        .filter(|(head, tail)| !head.is_empty() && !tail.is_empty())
        .ok_or_else(|| PropertyError::MalformedDefaultValue(text.to_string()))
}

impl FromStr for DefaultValue {
    type Err = PropertyError;

    fn from_str(text: &str) -> Result<Self> {
        let (code, payload) = text
            .split_once(':')
            .ok_or_else(|| PropertyError::MalformedDefaultValue(text.to_string()))?;
        let code = code.trim();
        let payload = payload.trim();

        let value_type = code.parse::<DefaultValueType>().map_err(|_| {
            PropertyError::UnknownDefaultValueType {
                code: code.to_string(),
                value: text.to_string(),
            }
        })?;
        if payload.is_empty() {
            return Err(PropertyError::MalformedDefaultValue(text.to_string()));
        }

        Ok(match value_type {
            DefaultValueType::AppParameter => Self::ApplicationParameter(payload.to_string()),
            DefaultValueType::FormParameter => Self::FormParameter(payload.to_string()),
            DefaultValueType::BlockItem => {
                let (block, item) = payload
                    .split_once('.')
                    .filter(|(block, item)| !block.is_empty() && !item.is_empty())
                    .ok_or_else(|| PropertyError::MalformedDefaultValue(text.to_string()))?;
                Self::BlockItem {
                    block: block.to_string(),
                    item: item.to_string(),
                }
            }
            DefaultValueType::ClassField => {
                let (class, field) = split_qualified(payload, text)?;
                Self::ClassField {
                    class: class.to_string(),
                    field: field.to_string(),
                }
            }
        })
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.value_type();
        match self {
            Self::ApplicationParameter(name) | Self::FormParameter(name) => {
                write!(f, "{code}:{name}")
            }
            Self::BlockItem { block, item } => write!(f, "{code}:{block}.{item}"),
            Self::ClassField { class, field } => write!(f, "{code}:{class}.{field}"),
        }
    }
}
