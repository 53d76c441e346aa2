//! Error types for the properties library.
//!
//! Every failure is a `PropertyError`. Besides its English `Display` text,
//! each variant exposes a stable message key and the context arguments that
//! go with it, so callers can render a localized message themselves.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the properties library.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// A group segment of a dotted path does not exist.
    #[error("Unable to resolve group '{segment}' in property path '{path}'")]
    UnknownGroup { path: String, segment: String },

    /// A stored value could not be converted to the requested type.
    #[error("Unable to convert value '{value}' of property '{name}' to {target}")]
    Conversion {
        name: String,
        value: String,
        target: &'static str,
    },

    /// A null-check was requested for a property that was never declared.
    #[error("No property named '{0}' has been declared")]
    UndeclaredProperty(String),

    /// Property or group name that is not a valid identifier.
    #[error("Invalid name '{0}'. Names start with a letter or '_' and contain no dots")]
    InvalidName(String),

    /// Unknown value for the `propertyType` attribute.
    #[error("Unknown property type '{0}'")]
    InvalidPropertyType(String),

    /// A required XML attribute is missing.
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// An element that is not allowed at this position.
    #[error("Unexpected element <{tag_name}> in <{context}>")]
    UnexpectedElement { tag_name: String, context: String },

    /// Element nesting exceeds the handler stack limit.
    #[error("Element nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),

    /// The XML document ended before the root element was closed.
    #[error("Unexpected end of document")]
    UnexpectedEof,

    /// A document exceeds the configured size limit.
    #[error("Document is {size} bytes, maximum is {max} bytes")]
    DocumentTooLarge { size: u64, max: u64 },

    /// A default value without the `TYPE_CODE:payload` shape.
    #[error("Invalid default value '{0}'. Expected TYPE_CODE:payload")]
    MalformedDefaultValue(String),

    /// A default value with a type code that is not recognised.
    #[error("Unknown default value type '{code}' in '{value}'")]
    UnknownDefaultValueType { code: String, value: String },

    /// An application or form parameter that does not exist.
    #[error("No {scope} parameter named '{name}'")]
    ParameterNotFound { scope: &'static str, name: String },

    /// A block referenced by a default value does not exist on the form.
    #[error("Block '{block}' does not exist on form '{form}'")]
    BlockNotFound { block: String, form: String },

    /// An item referenced by a default value does not exist on the block.
    #[error("Item '{item}' does not exist on block '{block}' of form '{form}'")]
    ItemNotFound {
        block: String,
        item: String,
        form: String,
    },

    /// No constants have been registered for this class.
    #[error("Class '{0}' could not be found")]
    ClassNotFound(String),

    /// The class has no constant with this name.
    #[error("Field '{field}' could not be found on class '{class}'")]
    FieldNotFound { class: String, field: String },

    /// The constant exists but is not public.
    #[error("Field '{field}' on class '{class}' is not accessible")]
    FieldNotAccessible { class: String, field: String },

    /// Lookups on this class have been denied.
    #[error("Access to field '{field}' on class '{class}' was denied")]
    SecurityViolation { class: String, field: String },

    /// XML syntax error reported by the reader.
    #[error("XML parsing failed at byte {position}: {source}")]
    XmlParse {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Loading a file failed.
    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<PropertyError>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl PropertyError {
    /// Stable key identifying the message, for localization by the caller.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::UnknownGroup { .. } => "ej.properties.unknown_group",
            Self::Conversion { .. } => "ej.properties.conversion_failed",
            Self::UndeclaredProperty(_) => "ej.properties.undeclared_property",
            Self::InvalidName(_) => "ej.properties.invalid_name",
            Self::InvalidPropertyType(_) => "ej.properties.invalid_property_type",
            Self::MissingAttribute { .. } => "ej.xml.missing_attribute",
            Self::UnexpectedElement { .. } => "ej.xml.unexpected_element",
            Self::NestingTooDeep(_) => "ej.xml.nesting_too_deep",
            Self::UnexpectedEof => "ej.xml.unexpected_eof",
            Self::DocumentTooLarge { .. } => "ej.xml.document_too_large",
            Self::XmlParse { .. } => "ej.xml.parse_failed",
            Self::MalformedDefaultValue(_) => "ej.default_value.malformed",
            Self::UnknownDefaultValueType { .. } => "ej.default_value.unknown_type",
            Self::ParameterNotFound { .. } => "ej.default_value.parameter_not_found",
            Self::BlockNotFound { .. } => "ej.default_value.block_not_found",
            Self::ItemNotFound { .. } => "ej.default_value.item_not_found",
            Self::ClassNotFound(_) => "ej.default_value.class_not_found",
            Self::FieldNotFound { .. } => "ej.default_value.field_not_found",
            Self::FieldNotAccessible { .. } => "ej.default_value.field_not_accessible",
            Self::SecurityViolation { .. } => "ej.default_value.security_violation",
            Self::Load { .. } => "ej.io.load_failed",
            Self::Io(_) => "ej.io.error",
            Self::YamlSerialization(_) => "ej.io.yaml_failed",
        }
    }

    /// Context arguments that accompany the message key, in display order.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::UnknownGroup { path, segment } => vec![path.clone(), segment.clone()],
            Self::Conversion {
                name,
                value,
                target,
            } => vec![name.clone(), value.clone(), (*target).to_string()],
            Self::UndeclaredProperty(name)
            | Self::InvalidName(name)
            | Self::InvalidPropertyType(name)
            | Self::MalformedDefaultValue(name)
            | Self::ClassNotFound(name) => vec![name.clone()],
            Self::MissingAttribute { element, attribute } => {
                vec![element.clone(), attribute.clone()]
            }
            Self::UnexpectedElement { tag_name, context } => {
                vec![tag_name.clone(), context.clone()]
            }
            Self::NestingTooDeep(max) => vec![max.to_string()],
            Self::UnexpectedEof => Vec::new(),
            Self::DocumentTooLarge { size, max } => vec![size.to_string(), max.to_string()],
            Self::XmlParse { position, source } => vec![position.to_string(), source.to_string()],
            Self::UnknownDefaultValueType { code, value } => vec![code.clone(), value.clone()],
            Self::ParameterNotFound { scope, name } => vec![(*scope).to_string(), name.clone()],
            Self::BlockNotFound { block, form } => vec![block.clone(), form.clone()],
            Self::ItemNotFound { block, item, form } => {
                vec![block.clone(), item.clone(), form.clone()]
            }
            Self::FieldNotFound { class, field }
            | Self::FieldNotAccessible { class, field }
            | Self::SecurityViolation { class, field } => vec![class.clone(), field.clone()],
            Self::Load { path, source } => vec![path.display().to_string(), source.to_string()],
            Self::Io(e) => vec![e.to_string()],
            Self::YamlSerialization(e) => vec![e.to_string()],
        }
    }

    /// Wrap an error with the file it occurred in.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::Load {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for properties operations.
pub type Result<T> = std::result::Result<T, PropertyError>;
