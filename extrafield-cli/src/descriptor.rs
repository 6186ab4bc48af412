//! Field descriptor strings
//!
//! A descriptor string lists custom fields as `~`-separated entries of the form
//! `columnid-type-name-defaults`. The generate pass expects the defaults wrapped
//! in backticks; the update pass accepts anything after the third dash.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::workbook::FieldRow;

static QUOTED_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)-(.*?)-(.*?)-`(.*?)`$").expect("valid regex"));

static LOOSE_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)-(.*?)-(.*?)-(.*)$").expect("valid regex"));

/// Separator between descriptor entries
pub const ENTRY_SEPARATOR: char = '~';

/// How the defaults part of an entry is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorSyntax {
    /// Defaults must be wrapped in backticks
    Quoted,
    /// Defaults are everything after the third dash
    Loose,
}

impl DescriptorSyntax {
    fn pattern(self) -> &'static Regex {
        match self {
            DescriptorSyntax::Quoted => &QUOTED_ENTRY,
            DescriptorSyntax::Loose => &LOOSE_ENTRY,
        }
    }
}

/// Declared type of a custom field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Dropdown,
    Multiselect,
    /// Any other type (text, date, number...); carries no value list
    Other(String),
}

impl FieldType {
    pub fn parse(s: &str) -> Self {
        match s {
            "dropdown" => FieldType::Dropdown,
            "multiselect" => FieldType::Multiselect,
            other => FieldType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Dropdown => "dropdown",
            FieldType::Multiselect => "multiselect",
            FieldType::Other(s) => s,
        }
    }

    /// Whether the field stores values drawn from a list
    pub fn has_value_list(&self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Multiselect)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One custom field parsed from a descriptor entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub column_id: String,
    pub field_type: FieldType,
    pub field_name: String,
    /// Defaults exactly as written, before splitting
    pub defaults_raw: String,
}

impl FieldDescriptor {
    /// Physical column holding the field's values
    pub fn column_name(&self) -> String {
        format!("custcolumn{}", self.column_id)
    }

    /// Declared default values, trimmed and stripped of backticks
    pub fn default_values(&self) -> Vec<String> {
        self.defaults_raw
            .split(',')
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_matches('`').to_string())
            .collect()
    }
}

/// Parse a single entry, returning `None` when it does not match the syntax
pub fn parse_entry(entry: &str, syntax: DescriptorSyntax) -> Option<FieldDescriptor> {
    let caps = syntax.pattern().captures(entry)?;

    Some(FieldDescriptor {
        column_id: caps.get(1)?.as_str().to_string(),
        field_type: FieldType::parse(caps.get(2)?.as_str()),
        field_name: caps.get(3)?.as_str().to_string(),
        defaults_raw: caps.get(4)?.as_str().to_string(),
    })
}

/// Parse a full descriptor string
///
/// Malformed entries are logged and skipped so one bad row does not block the
/// rest of the run.
pub fn parse_descriptors(input: &str, syntax: DescriptorSyntax) -> Vec<FieldDescriptor> {
    if input.is_empty() {
        return Vec::new();
    }

    input
        .split(ENTRY_SEPARATOR)
        .filter_map(|entry| {
            let parsed = parse_entry(entry, syntax);
            if parsed.is_none() {
                log::error!("Invalid entry format for: {}", entry);
            }
            parsed
        })
        .collect()
}

/// Render spreadsheet rows as a quoted descriptor string
pub fn build_descriptor_string(rows: &[FieldRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}-{}-{}-`{}`",
                row.column_id, row.field_type, row.field_name, row.default_value
            )
        })
        .collect::<Vec<_>>()
        .join(&ENTRY_SEPARATOR.to_string())
}
