//! Loading property trees from XML.
//!
//! A properties document has an arbitrary document element holding
//! properties, property lists and nested groups:
//!
//! ```xml
//! <extensionProperties name="orders">
//!   <property name="title" multilingual="true">ORDERS_TITLE</property>
//!   <propertyGroup name="displayCoordinates">
//!     <property name="xpos" propertyType="INTEGER">10</property>
//!   </propertyGroup>
//!   <propertyList name="columns">
//!     <listEntry>
//!       <property name="width">10</property>
//!     </listEntry>
//!   </propertyList>
//! </extensionProperties>
//! ```
//!
//! A load either returns the complete tree or an error; partially built
//! trees are never handed out.

mod handlers;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::MAX_DOCUMENT_SIZE;
use crate::error::{PropertyError, Result};
use crate::group::PropertyGroup;
use crate::parser::parse_document;

use handlers::PropertyHandler;

/// Parse a property tree from an XML string.
///
/// # Examples
/// ```
/// use entirej_properties::parse_properties;
///
/// let xml = r#"<extensionProperties>
///     <propertyGroup name="displayCoordinates">
///         <property name="xpos" propertyType="INTEGER">10</property>
///     </propertyGroup>
/// </extensionProperties>"#;
///
/// let root = parse_properties(xml).unwrap();
/// assert_eq!(root.get_int_property("displayCoordinates.xpos", 0).unwrap(), 10);
/// ```
pub fn parse_properties(xml: &str) -> Result<PropertyGroup> {
    read_properties(xml.as_bytes())
}

/// Parse a property tree from any buffered reader.
pub fn read_properties<R: BufRead>(source: R) -> Result<PropertyGroup> {
    let handler = parse_document(source, PropertyHandler::root())?;
    // The root handler is always a group state.
    handler.into_group().ok_or(PropertyError::UnexpectedEof)
}

/// Load a property tree from a file.
///
/// Files larger than [`MAX_DOCUMENT_SIZE`] are rejected before parsing.
/// Errors are wrapped with the file path.
pub fn load_properties_file(path: impl AsRef<Path>) -> Result<PropertyGroup> {
    let path = path.as_ref();
    load(path).map_err(|e| e.in_file(path))
}

fn load(path: &Path) -> Result<PropertyGroup> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > MAX_DOCUMENT_SIZE {
        return Err(PropertyError::DocumentTooLarge {
            size,
            max: MAX_DOCUMENT_SIZE,
        });
    }

    let root = read_properties(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        properties = root.property_count(),
        "Loaded property tree"
    );
    Ok(root)
}
