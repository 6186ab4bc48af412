//! Collecting, validating and normalizing observed column values

use std::collections::BTreeSet;
use std::fmt;

use crate::descriptor::FieldType;

/// Data problem that must be fixed in the database before metadata can be
/// generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A dropdown column holds a value with a comma, which would be read back
    /// as several options
    CommaInDropdown { column: String },
    /// Leading/trailing whitespace, or an embedded newline or tab
    Whitespace { value: String },
    /// A backslash, which the application treats as an escape
    EscapeCharacter { value: String },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::CommaInDropdown { column } => {
                write!(f, "Alert: {} contains a comma while type is dropdown!", column)
            }
            Alert::Whitespace { value } => write!(
                f,
                "Alert: Value '{}' has leading/trailing spaces, tabs, or newlines!",
                value
            ),
            Alert::EscapeCharacter { value } => {
                write!(f, "Alert: Value '{}' contains escape characters!", value)
            }
        }
    }
}

/// Turn distinct column values into individual option values
///
/// Multiselect cells are comma-joined option lists and get split; pieces are
/// left untrimmed so [`validate_values`] can still see stray whitespace.
pub fn collect_values(
    field_type: &FieldType,
    column: &str,
    distinct: &[String],
) -> Result<Vec<String>, Alert> {
    match field_type {
        FieldType::Dropdown => {
            if distinct.iter().any(|v| v.contains(',')) {
                return Err(Alert::CommaInDropdown {
                    column: column.to_string(),
                });
            }
            Ok(distinct.to_vec())
        }
        FieldType::Multiselect => Ok(distinct
            .iter()
            .flat_map(|v| v.split(','))
            .filter(|piece| !piece.trim().is_empty())
            .map(str::to_string)
            .collect()),
        FieldType::Other(_) => Ok(distinct.to_vec()),
    }
}

/// Check every value for characters the application cannot store cleanly
pub fn validate_values(values: &[String]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for value in values {
        let padded = value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace);
        if padded || value.contains('\n') || value.contains('\t') {
            alerts.push(Alert::Whitespace {
                value: value.clone(),
            });
        }
        if value.contains('\\') {
            alerts.push(Alert::EscapeCharacter {
                value: value.clone(),
            });
        }
    }

    alerts
}

/// Trim, drop empties, dedupe and sort
pub fn normalize_values<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Collect, validate and normalize in one go
///
/// Returns every alert found; the caller is expected to stop the pass when
/// any are present.
pub fn prepare_values(
    field_type: &FieldType,
    column: &str,
    distinct: &[String],
) -> Result<Vec<String>, Vec<Alert>> {
    let collected = collect_values(field_type, column, distinct).map_err(|alert| vec![alert])?;

    let alerts = validate_values(&collected);
    if !alerts.is_empty() {
        return Err(alerts);
    }

    Ok(normalize_values(collected.as_slice()))
}
