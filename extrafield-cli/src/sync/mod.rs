//! The generate (INSERT) and update (UPDATE) passes
//!
//! Each pass walks a descriptor string once, reads the observed values of the
//! list-valued fields and appends SQL and log lines to the result files. Data
//! alerts stop a pass early; the lines written up to that point are kept.

pub mod generate;
pub mod update;

use anyhow::Result;

use crate::output::{OutputFiles, OutputKind};
use crate::reconcile::Alert;
use crate::source::ColumnSource;

pub use generate::run_generate;
pub use update::run_update;

/// Everything a pass needs besides its descriptor string
pub struct SyncContext<'a> {
    pub source: &'a dyn ColumnSource,
    pub files: &'a OutputFiles,
    pub table: &'a str,
    pub account_id: &'a str,
}

/// Counters reported after a pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub fields: usize,
    pub inserts: usize,
    pub updates: usize,
    /// Fields whose column is missing from the table
    pub missing_columns: usize,
    /// Fields held back because of case-only differences
    pub case_conflicts: usize,
    /// Fields with nothing new to add
    pub unchanged: usize,
}

/// How a pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Completed(PassSummary),
    /// Stopped on data alerts for `column`
    Aborted {
        column: String,
        alerts: Vec<Alert>,
        summary: PassSummary,
    },
}

impl PassOutcome {
    pub fn summary(&self) -> &PassSummary {
        match self {
            PassOutcome::Completed(summary) => summary,
            PassOutcome::Aborted { summary, .. } => summary,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, PassOutcome::Aborted { .. })
    }
}

/// Line written to a pass's result file when it fails
pub fn failure_message(err: &anyhow::Error) -> String {
    if err.downcast_ref::<sqlx::Error>().is_some() {
        format!("Database Error: {:#}", err)
    } else {
        format!("An unexpected error occurred: {:#}", err)
    }
}

/// Write a failed pass's error into its result file before passing it on
fn record_failure<T>(files: &OutputFiles, kind: OutputKind, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        let message = failure_message(err);
        log::error!("{}", message);
        if let Err(write_err) = files.record_failure(kind, &message) {
            log::error!("Could not record failure: {:#}", write_err);
        }
    }
    result
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use crate::config::OutputConfig;
    use crate::output::{OutputFiles, OutputKind};

    /// Output files in a fresh per-test directory
    pub fn temp_files(name: &str) -> (OutputFiles, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "extrafield-sync-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        let files = OutputFiles::new(OutputConfig {
            dir: dir.clone(),
            ..OutputConfig::default()
        });
        files.prepare().unwrap();
        (files, dir)
    }

    /// Lines of an output file, empty when it was never written
    pub fn lines(files: &OutputFiles, kind: OutputKind) -> Vec<String> {
        std::fs::read_to_string(files.path(kind))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
