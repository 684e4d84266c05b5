//! Table and JSON output for the shell.

use std::io::Write;

use comfy_table::{presets::ASCII_FULL, ContentArrangement, Table};
use serde_json::{Map, Value};

use crate::rest::resources::Resource;
use crate::shell::errors::ShellError;

const TABLE_WIDTH: u16 = 100;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// ASCII tables.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Maps the `--json` flag to a format.
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn selected(resource: &Resource, fields: &[&str]) -> Map<String, Value> {
    let absent = Value::String(String::new());
    fields
        .iter()
        .map(|f| ((*f).to_string(), resource.field_or(f, &absent).clone()))
        .collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
    table
}

/// Prints the given fields of one resource as a property/value table, or as
/// a JSON object.
///
/// Fields the resource lacks print as empty strings.
///
/// # Errors
///
/// Returns an error if writing or JSON rendering fails.
pub fn print_dict<W: Write>(
    out: &mut W,
    resource: &Resource,
    fields: &[&str],
    format: OutputFormat,
) -> Result<(), ShellError> {
    let data = selected(resource, fields);

    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(["Property", "Value"]);
    for (name, value) in &data {
        table.add_row([name.clone(), cell_text(value)]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints resources as a table with one column per field, or as a JSON
/// array of objects.
///
/// # Errors
///
/// Returns an error if writing or JSON rendering fails.
pub fn print_list<W: Write>(
    out: &mut W,
    resources: &[Resource],
    fields: &[&str],
    labels: &[&str],
    format: OutputFormat,
) -> Result<(), ShellError> {
    if format == OutputFormat::Json {
        let rows: Vec<Value> = resources
            .iter()
            .map(|r| Value::Object(selected(r, fields)))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(labels.iter().copied());
    for resource in resources {
        let absent = Value::String(String::new());
        table.add_row(
            fields
                .iter()
                .map(|f| cell_text(resource.field_or(f, &absent))),
        );
    }
    writeln!(out, "{table}")?;
    Ok(())
}
