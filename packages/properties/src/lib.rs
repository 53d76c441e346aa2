//! EntireJ properties - hierarchical configuration trees for the EntireJ
//! framework.
//!
//! Framework, renderer and form settings are stored as XML documents of
//! nested property groups. This crate loads those documents into a
//! [`PropertyGroup`] tree, offers typed dot-path access to its values,
//! merges form-specific values over framework defaults and resolves the
//! `TYPE_CODE:payload` default-value expressions used by block items.
//!
//! # Example
//!
//! ```
//! use entirej_properties::parse_properties;
//!
//! let group = parse_properties(
//!     r#"<formProperties>
//!          <propertyGroup name="display">
//!            <property name="width" propertyType="INTEGER">640</property>
//!          </propertyGroup>
//!        </formProperties>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(group.get_int_property("display.width", 0).unwrap(), 640);
//! assert_eq!(group.get_int_property("display.height", 480).unwrap(), 480);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Limits, element names and validation
//! - [`error`]: Error type and Result alias
//! - [`types`]: Runtime values produced by default-value resolution
//! - [`property`], [`list`], [`group`]: The property tree
//! - [`parser`]: Event-driven XML parsing with a stack of tag handlers
//! - [`loader`]: Tag handlers that build a tree from XML
//! - [`defaults`]: The default-value expression language
//! - [`translate`]: Translation of multilingual values
//! - [`context`]: Framework-wide context
//! - [`yaml`]: YAML output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod group;
pub mod list;
pub mod loader;
pub mod parser;
pub mod property;
pub mod translate;
pub mod types;
pub mod yaml;

pub use context::FrameworkContext;
pub use defaults::{
    Block, ConstantRegistry, ConstantResolver, DefaultValue, DefaultValueResolver,
    DefaultValueSource, DefaultValueType, FormState,
};
pub use error::{PropertyError, Result};
pub use group::PropertyGroup;
pub use list::{PropertyList, PropertyListEntry};
pub use loader::{load_properties_file, parse_properties, read_properties};
pub use property::{Property, PropertyType};
pub use translate::Translator;
pub use types::Value;
