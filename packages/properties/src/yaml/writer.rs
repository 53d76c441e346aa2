//! YAML writer for property trees.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::group::PropertyGroup;
use crate::list::{PropertyList, PropertyListEntry};
use crate::property::{Property, PropertyType};

/// Property representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    multilingual: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    mandatory: bool,
}

impl From<&Property> for YamlProperty {
    fn from(p: &Property) -> Self {
        // STRING is the implied type and is left out
        let property_type = (p.property_type() != PropertyType::String)
            .then(|| p.property_type().to_string());
        Self {
            property_type,
            value: p.value().map(str::to_string),
            multilingual: p.is_multilingual(),
            mandatory: p.is_mandatory(),
        }
    }
}

type YamlEntry = BTreeMap<String, String>;

fn yaml_entry(entry: &PropertyListEntry) -> YamlEntry {
    entry
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn yaml_list(list: &PropertyList) -> Vec<YamlEntry> {
    list.entries().iter().map(yaml_entry).collect()
}

/// Group representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlGroup {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, YamlProperty>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    lists: BTreeMap<String, Vec<YamlEntry>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    groups: BTreeMap<String, YamlGroup>,
}

impl From<&PropertyGroup> for YamlGroup {
    fn from(group: &PropertyGroup) -> Self {
        Self {
            properties: group
                .properties()
                .map(|p| (p.name().to_string(), YamlProperty::from(p)))
                .collect(),
            lists: group
                .property_lists()
                .map(|l| (l.name().to_string(), yaml_list(l)))
                .collect(),
            groups: group
                .groups()
                .map(|g| (g.name().to_string(), YamlGroup::from(g)))
                .collect(),
        }
    }
}

/// Document representation: the root group under its own name.
#[derive(Debug, Serialize)]
struct YamlDocument {
    name: String,
    #[serde(flatten)]
    root: YamlGroup,
}

/// Indent YAML sequences so items sit under their parent key.
///
/// ```yaml
/// # Before:          # After:
/// columns:           columns:
/// - name: id           - name: id
///   width: '40'          width: '40'
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut seq_indents: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();
        let is_item = trimmed.starts_with("- ") || trimmed == "-";

        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !is_item) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if is_item && seq_indents.last() != Some(&indent) {
            seq_indents.push(indent);
        }

        let extra = seq_indents.len() * 2;
        if extra > 0 {
            result.push(format!("{}{}", " ".repeat(indent + extra), trimmed));
        } else {
            result.push(line.to_string());
        }
    }

    result.join("\n")
}

/// Render a property tree as YAML.
///
/// Keys are emitted in name order and empty `properties`, `lists` and
/// `groups` sections are omitted, so equal trees render identically.
///
/// # Examples
/// ```
/// use entirej_properties::{parse_properties, yaml::generate_yaml};
///
/// let group = parse_properties(
///     r#"<renderer><property name="rowHeight" propertyType="INTEGER">20</property></renderer>"#,
/// )
/// .unwrap();
/// let yaml = generate_yaml(&group).unwrap();
/// assert!(yaml.contains("rowHeight:\n    type: INTEGER\n    value: '20'"));
/// ```
pub fn generate_yaml(group: &PropertyGroup) -> Result<String> {
    let document = YamlDocument {
        name: group.name().to_string(),
        root: YamlGroup::from(group),
    };
    let yaml_string = serde_yaml_ng::to_string(&document)?;
    let yaml_string = indent_yaml_sequences(&yaml_string);

    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Save a property tree as a YAML file.
///
/// Writes to a temporary file next to `path`, syncs it and renames it into
/// place so an existing file is never left half-written.
pub fn save_yaml(group: &PropertyGroup, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = generate_yaml(group)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "properties.yaml".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), "Saved property tree");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn create_test_group() -> PropertyGroup {
        let mut header = PropertyGroup::new("header");
        header.add_property(
            Property::new("visible")
                .with_type(PropertyType::Boolean)
                .with_value("true"),
        );
        header.add_group(PropertyGroup::new("empty"));

        let mut columns = PropertyList::new("columns");
        columns.add_entry(
            PropertyListEntry::new()
                .with_property("name", "id")
                .with_property("width", "40"),
        );

        let mut root = PropertyGroup::new("grid");
        root.add_property(
            Property::new("title")
                .with_value("Orders")
                .with_multilingual(true),
        );
        root.add_property(Property::new("style").with_mandatory(true));
        root.add_list(columns);
        root.add_group(header);
        root
    }

    #[test]
    fn test_generate_yaml() {
        let yaml = generate_yaml(&create_test_group()).unwrap();

        assert_eq!(
            yaml,
            "---\n\
             name: grid\n\
             properties:\n\
             \x20 style:\n\
             \x20   mandatory: true\n\
             \x20 title:\n\
             \x20   value: Orders\n\
             \x20   multilingual: true\n\
             lists:\n\
             \x20 columns:\n\
             \x20   - name: id\n\
             \x20     width: '40'\n\
             groups:\n\
             \x20 header:\n\
             \x20   properties:\n\
             \x20     visible:\n\
             \x20       type: BOOLEAN\n\
             \x20       value: 'true'\n\
             \x20   groups:\n\
             \x20     empty: {}\n"
        );
    }

    #[test]
    fn test_generate_yaml_is_deterministic() {
        let first = generate_yaml(&create_test_group()).unwrap();
        let second = generate_yaml(&create_test_group()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_yaml() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("grid.yaml");
        save_yaml(&create_test_group(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\nname: grid\n"));
        assert!(!temp_dir.path().join(".grid.yaml.tmp").exists());
    }

    #[test]
    fn test_indent_yaml_sequences() {
        let input =
            "top: val\nitems:\n- name: a\n  val: 1\n- name: b\n  nested:\n  - id: x\n    v: 1";
        assert_eq!(
            indent_yaml_sequences(input),
            "top: val\nitems:\n  - name: a\n    val: 1\n  - name: b\n    nested:\n      - id: x\n        v: 1"
        );
    }
}
