//! Tag handlers building a property tree.

use crate::config::{
    parse_flag, validate_property_name, GROUP_ELEMENT, LIST_ELEMENT, LIST_ENTRY_ELEMENT,
    MANDATORY_ATTRIBUTE, MULTILINGUAL_ATTRIBUTE, NAME_ATTRIBUTE, PROPERTY_ELEMENT,
    PROPERTY_TYPE_ATTRIBUTE,
};
use crate::error::{PropertyError, Result};
use crate::group::PropertyGroup;
use crate::list::{PropertyList, PropertyListEntry};
use crate::parser::{ElementText, StartTag, TagHandler};
use crate::property::{Property, PropertyType};

/// Parser states, one per kind of element in a properties document.
#[derive(Debug)]
pub(crate) enum PropertyHandler {
    /// The document element, or a `<propertyGroup>`.
    Group(GroupState),
    /// A `<property>` directly inside a group.
    Property(PropertyState),
    /// A `<propertyList>`.
    List(ListState),
    /// A `<listEntry>`.
    Entry(EntryState),
    /// A `<property>` inside a list entry.
    EntryValue(EntryValueState),
}

impl PropertyHandler {
    /// Handler for the document element. The root group takes the element's
    /// `name` attribute when present, its tag name otherwise.
    pub(crate) fn root() -> Self {
        Self::Group(GroupState {
            tag: None,
            group: PropertyGroup::new(""),
        })
    }

    pub(crate) fn into_group(self) -> Option<PropertyGroup> {
        match self {
            Self::Group(state) => Some(state.group),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GroupState {
    /// Own element; `None` until the document element has been seen.
    tag: Option<StartTag>,
    group: PropertyGroup,
}

#[derive(Debug)]
pub(crate) struct PropertyState {
    tag: StartTag,
    property: Property,
}

#[derive(Debug)]
pub(crate) struct ListState {
    tag: StartTag,
    list: PropertyList,
}

#[derive(Debug)]
pub(crate) struct EntryState {
    tag: StartTag,
    entry: PropertyListEntry,
}

#[derive(Debug)]
pub(crate) struct EntryValueState {
    tag: StartTag,
    name: String,
    value: Option<String>,
}

fn required_name(tag: &StartTag) -> Result<String> {
    let name = tag.require_attribute(NAME_ATTRIBUTE)?;
    validate_property_name(name)?;
    Ok(name.to_string())
}

fn property_from_tag(tag: &StartTag) -> Result<Property> {
    let name = required_name(tag)?;
    let property_type = match tag.attribute(PROPERTY_TYPE_ATTRIBUTE) {
        Some(kind) => kind
            .trim()
            .parse::<PropertyType>()
            .map_err(|_| PropertyError::InvalidPropertyType(kind.to_string()))?,
        None => PropertyType::String,
    };
    Ok(Property::new(name)
        .with_type(property_type)
        .with_multilingual(parse_flag(tag.attribute(MULTILINGUAL_ATTRIBUTE)))
        .with_mandatory(parse_flag(tag.attribute(MANDATORY_ATTRIBUTE))))
}

impl TagHandler for PropertyHandler {
    fn start_local(&mut self, tag: &StartTag) -> Result<Option<Self>> {
        match self {
            Self::Group(state) => {
                if state.tag.is_none() {
                    let name = tag.attribute(NAME_ATTRIBUTE).unwrap_or(tag.name.as_str());
                    state.group = PropertyGroup::new(name);
                    state.tag = Some(tag.clone());
                    return Ok(None);
                }
                match tag.name.as_str() {
                    PROPERTY_ELEMENT => Ok(Some(Self::Property(PropertyState {
                        property: property_from_tag(tag)?,
                        tag: tag.clone(),
                    }))),
                    GROUP_ELEMENT => Ok(Some(Self::Group(GroupState {
                        group: PropertyGroup::new(required_name(tag)?),
                        tag: Some(tag.clone()),
                    }))),
                    LIST_ELEMENT => Ok(Some(Self::List(ListState {
                        list: PropertyList::new(required_name(tag)?),
                        tag: tag.clone(),
                    }))),
                    _ => Err(PropertyError::UnexpectedElement {
                        tag_name: tag.name.clone(),
                        context: state.group.name().to_string(),
                    }),
                }
            }
            Self::List(state) => match tag.name.as_str() {
                LIST_ENTRY_ELEMENT => Ok(Some(Self::Entry(EntryState {
                    tag: tag.clone(),
                    entry: PropertyListEntry::new(),
                }))),
                _ => Err(state.tag.unexpected_child(tag)),
            },
            Self::Entry(state) => match tag.name.as_str() {
                PROPERTY_ELEMENT => Ok(Some(Self::EntryValue(EntryValueState {
                    name: required_name(tag)?,
                    tag: tag.clone(),
                    value: None,
                }))),
                _ => Err(state.tag.unexpected_child(tag)),
            },
            Self::Property(PropertyState { tag: own, .. })
            | Self::EntryValue(EntryValueState { tag: own, .. }) => Err(own.unexpected_child(tag)),
        }
    }

    fn end_local(&mut self, _name: &str, text: &ElementText) -> Result<()> {
        match self {
            Self::Property(state) => state.property.set_value(text.clone().into_value()),
            Self::EntryValue(state) => state.value = text.clone().into_value(),
            Self::Group(_) | Self::List(_) | Self::Entry(_) => {}
        }
        Ok(())
    }

    fn child_finished(&mut self, child: Self) -> Result<()> {
        match (self, child) {
            (Self::Group(parent), Self::Property(state)) => {
                if let Some(previous) = parent.group.add_property(state.property) {
                    tracing::warn!(
                        group = %parent.group.name(),
                        property = %previous.name(),
                        "Duplicate property, keeping the last definition"
                    );
                }
            }
            (Self::Group(parent), Self::Group(state)) => {
                if let Some(previous) = parent.group.add_group(state.group) {
                    tracing::warn!(
                        group = %parent.group.name(),
                        child = %previous.name(),
                        "Duplicate property group, keeping the last definition"
                    );
                }
            }
            (Self::Group(parent), Self::List(state)) => {
                if let Some(previous) = parent.group.add_list(state.list) {
                    tracing::warn!(
                        group = %parent.group.name(),
                        list = %previous.name(),
                        "Duplicate property list, keeping the last definition"
                    );
                }
            }
            (Self::List(parent), Self::Entry(state)) => parent.list.add_entry(state.entry),
            (Self::Entry(parent), Self::EntryValue(state)) => {
                parent
                    .entry
                    .set_property(state.name, state.value.unwrap_or_default());
            }
            // start_local only ever creates the pairs above
            (_, other) => tracing::debug!(handler = ?other, "Ignoring unexpected child handler"),
        }
        Ok(())
    }
}
