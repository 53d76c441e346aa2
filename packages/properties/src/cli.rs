//! Command-line interface for inspecting property files.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::validate_path;
use crate::context::FrameworkContext;
use crate::defaults::{Block, FormState};
use crate::error::{PropertyError, Result};
use crate::group::PropertyGroup;
use crate::loader::load_properties_file;
use crate::types::Value;
use crate::yaml::{generate_yaml, save_yaml};

/// EntireJ properties - inspect, merge and resolve framework property files.
#[derive(Parser)]
#[command(name = "ej-properties")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a property file and print it as YAML.
    Show {
        /// Property XML file
        file: PathBuf,
    },

    /// Read one property by its dotted path.
    Get {
        /// Property XML file
        file: PathBuf,

        /// Dotted path, e.g. display.width
        path: String,

        /// Type to read the value as
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Value to use when the property is unset
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Copy the values of one property file into another.
    Merge {
        /// File that declares the properties
        target: PathBuf,

        /// File whose values are copied into the target
        source: PathBuf,

        /// Write the merged tree to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a default-value expression such as APP_PARAMETER:country.
    Resolve {
        /// Expression in TYPE_CODE:payload form
        expression: String,

        /// Name of the form the value is resolved for
        #[arg(long, default_value = "form")]
        form: String,

        /// Application parameter, as name=value
        #[arg(long = "app-param", value_parser = parse_key_value)]
        app_params: Vec<(String, String)>,

        /// Form parameter, as name=value
        #[arg(long = "form-param", value_parser = parse_key_value)]
        form_params: Vec<(String, String)>,

        /// Focused block item value, as block.item=value
        #[arg(long = "item", value_parser = parse_key_value)]
        items: Vec<(String, String)>,

        /// Class constant, as qualified.Class.FIELD=value
        #[arg(long = "constant", value_parser = parse_key_value)]
        constants: Vec<(String, String)>,

        /// Framework property file to load into the context
        #[arg(long)]
        framework: Option<PathBuf>,
    },
}

/// Value type for `get --as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    Float,
    Double,
}

fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{arg}'")),
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file } => show_command(&file),
        Commands::Get {
            file,
            path,
            kind,
            default,
        } => get_command(&file, &path, kind, default.as_deref()),
        Commands::Merge {
            target,
            source,
            output,
        } => merge_command(&target, &source, output.as_deref()),
        Commands::Resolve {
            expression,
            form,
            app_params,
            form_params,
            items,
            constants,
            framework,
        } => {
            let state = build_form_state(&form, app_params, form_params, items);
            resolve_command(&expression, &state, constants, framework.as_deref())
        }
    }
}

fn show_command(file: &Path) -> Result<()> {
    let group = load_properties_file(file)?;
    print!("{}", generate_yaml(&group)?);
    Ok(())
}

fn parse_default<T: FromStr>(
    path: &str,
    default: Option<&str>,
    target: &'static str,
) -> Result<Option<T>> {
    default
        .map(|text| {
            text.trim().parse().map_err(|_| PropertyError::Conversion {
                name: path.to_string(),
                value: text.to_string(),
                target,
            })
        })
        .transpose()
}

/// Read a property as `kind` and format it for display.
fn read_value(
    group: &PropertyGroup,
    path: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> Result<Option<String>> {
    let value = match kind {
        ValueKind::String => group
            .get_string_property(path)
            .or(default)
            .map(str::to_string),
        ValueKind::Bool => {
            let default = parse_default(path, default, "boolean")?.unwrap_or(false);
            Some(group.get_boolean_property(path, default)?.to_string())
        }
        ValueKind::Int => {
            let default = parse_default(path, default, "int")?.unwrap_or(0);
            Some(group.get_int_property(path, default)?.to_string())
        }
        ValueKind::Float => {
            let default = parse_default(path, default, "float")?.unwrap_or(0.0);
            Some(group.get_float_property(path, default)?.to_string())
        }
        ValueKind::Double => {
            let default = parse_default(path, default, "double")?.unwrap_or(0.0);
            Some(group.get_double_property(path, default)?.to_string())
        }
    };
    Ok(value)
}

fn get_command(file: &Path, path: &str, kind: ValueKind, default: Option<&str>) -> Result<()> {
    validate_path(path)?;
    let group = load_properties_file(file)?;
    match read_value(&group, path, kind, default)? {
        Some(value) => println!("{value}"),
        None => println!("{}", style("null").dim()),
    }
    Ok(())
}

fn merge_command(target: &Path, source: &Path, output: Option<&Path>) -> Result<()> {
    let mut merged = load_properties_file(target)?;
    let values = load_properties_file(source)?;
    merged.copy_values_from_group(&values)?;

    match output {
        Some(output) => {
            save_yaml(&merged, output)?;
            println!(
                "{} {}",
                style("Saved to:").green().bold(),
                output.display()
            );
        }
        None => print!("{}", generate_yaml(&merged)?),
    }
    Ok(())
}

/// Build the form state for `resolve` from command-line pairs.
///
/// Items are grouped per block into one focused record; the block declares
/// exactly the items given for it.
fn build_form_state(
    form: &str,
    app_params: Vec<(String, String)>,
    form_params: Vec<(String, String)>,
    items: Vec<(String, String)>,
) -> FormState {
    let mut state = FormState::new(form);
    for (name, value) in app_params {
        state.set_application_parameter(name, Value::from_literal(&value));
    }
    for (name, value) in form_params {
        state.set_form_parameter(name, Value::from_literal(&value));
    }

    let mut blocks: BTreeMap<String, HashMap<String, Value>> = BTreeMap::new();
    for (key, value) in items {
        let Some((block, item)) = key.split_once('.') else {
            tracing::warn!(item = %key, "Ignoring item without a block prefix");
            continue;
        };
        blocks
            .entry(block.to_string())
            .or_default()
            .insert(item.to_string(), Value::from_literal(&value));
    }
    for (name, record) in blocks {
        let mut block = Block::new(name, record.keys().cloned().collect::<Vec<_>>());
        block.add_record(record);
        state.add_block(block);
    }
    state
}

fn resolve_command(
    expression: &str,
    state: &FormState,
    constants: Vec<(String, String)>,
    framework: Option<&Path>,
) -> Result<()> {
    let mut context = match framework {
        Some(path) => FrameworkContext::load(path)?,
        None => FrameworkContext::new(PropertyGroup::new("framework")),
    };
    for (key, value) in constants {
        match key.rsplit_once('.') {
            Some((class, field)) => {
                context
                    .constants_mut()
                    .register(class, field, Value::from_literal(&value));
            }
            None => tracing::warn!(constant = %key, "Ignoring constant without a class prefix"),
        }
    }

    let value = context.default_value_resolver().resolve_str(expression, state)?;
    if value.is_null() {
        println!("{}", style("null").dim());
    } else {
        println!("{value}");
    }
    Ok(())
}
