//! Value reconciliation between declared defaults and observed column values
//!
//! Everything in here is pure: the sync passes fetch the data and decide what
//! to write, these functions decide what the data means.

pub mod compare;
pub mod values;

pub use compare::{CaseMatch, Comparison, case_insensitive_matches, compare, merge_defaults};
pub use values::{Alert, collect_values, normalize_values, prepare_values, validate_values};
