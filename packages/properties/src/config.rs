//! Configuration constants and validation functions.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{PropertyError, Result};

/// Maximum size of a properties document in bytes (4 MB).
///
/// Form definitions with their extension properties are typically a few
/// hundred kilobytes at most.
pub const MAX_DOCUMENT_SIZE: u64 = 4 * 1024 * 1024;

/// Maximum number of nested handlers while parsing a document.
///
/// Every `<propertyGroup>` level installs one handler, so this bounds group
/// nesting as well.
pub const MAX_HANDLER_DEPTH: usize = 64;

/// Separator between the segments of a dotted property path.
pub const PATH_SEPARATOR: char = '.';

/// Element holding a nested property group.
pub const GROUP_ELEMENT: &str = "propertyGroup";

/// Element holding a single property value.
pub const PROPERTY_ELEMENT: &str = "property";

/// Element holding a property list.
pub const LIST_ELEMENT: &str = "propertyList";

/// Element holding one row of a property list.
pub const LIST_ENTRY_ELEMENT: &str = "listEntry";

/// Attribute naming a group, property or list.
pub const NAME_ATTRIBUTE: &str = "name";

/// Attribute flagging a property as multilingual.
pub const MULTILINGUAL_ATTRIBUTE: &str = "multilingual";

/// Attribute flagging a property as mandatory.
pub const MANDATORY_ATTRIBUTE: &str = "mandatory";

/// Attribute giving the kind of a property.
pub const PROPERTY_TYPE_ATTRIBUTE: &str = "propertyType";

/// Property, group and list names.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("valid regex"));

/// Dotted paths: one or more names joined by dots.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*(\.[A-Za-z_][A-Za-z0-9_\-]*)*$").expect("valid regex")
});

/// Validate a property, group or list name.
///
/// # Examples
/// ```
/// use entirej_properties::config::validate_property_name;
///
/// assert!(validate_property_name("xpos").is_ok());
/// assert!(validate_property_name("display.xpos").is_err());
/// ```
pub fn validate_property_name(name: &str) -> Result<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(PropertyError::InvalidName(name.to_string()))
    }
}

/// Validate a dotted property path.
///
/// # Examples
/// ```
/// use entirej_properties::config::validate_path;
///
/// assert!(validate_path("displayCoordinates.xpos").is_ok());
/// assert!(validate_path("displayCoordinates..xpos").is_err());
/// ```
pub fn validate_path(path: &str) -> Result<()> {
    if PATH_PATTERN.is_match(path) {
        Ok(())
    } else {
        Err(PropertyError::InvalidName(path.to_string()))
    }
}

/// Parse an XML boolean attribute. Anything but a case-insensitive "true" is false.
#[must_use]
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
