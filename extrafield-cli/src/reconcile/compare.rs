//! Comparing declared defaults with observed values

use std::collections::BTreeSet;

/// An observed value that differs from a declared default only by case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMatch {
    pub db_value: String,
    pub default_value: String,
}

/// Split of declared and observed values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Declared defaults that also occur in the data, in declaration order
    pub existing: Vec<String>,
    /// Observed values not declared as defaults, sorted (observed values
    /// arrive normalized)
    pub new: Vec<String>,
}

impl Comparison {
    pub fn has_new_values(&self) -> bool {
        !self.new.is_empty()
    }
}

/// Find observed values that would duplicate a default if only case differed
pub fn case_insensitive_matches(defaults: &[String], db_values: &[String]) -> Vec<CaseMatch> {
    let mut matches = Vec::new();

    for db_value in db_values {
        let lowered = db_value.to_lowercase();
        for default_value in defaults {
            if lowered == default_value.to_lowercase() && db_value != default_value {
                matches.push(CaseMatch {
                    db_value: db_value.clone(),
                    default_value: default_value.clone(),
                });
            }
        }
    }

    matches
}

pub fn compare(defaults: &[String], db_values: &[String]) -> Comparison {
    let existing = defaults
        .iter()
        .filter(|v| db_values.contains(*v))
        .cloned()
        .collect();
    let new = db_values
        .iter()
        .filter(|v| !defaults.contains(*v))
        .cloned()
        .collect();

    Comparison { existing, new }
}

/// Combined default set as stored in `tblextrafields.defaultvalue`
pub fn merge_defaults(defaults: &[String], new: &[String]) -> String {
    defaults
        .iter()
        .chain(new)
        .filter(|v| !v.is_empty())
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(",")
}
