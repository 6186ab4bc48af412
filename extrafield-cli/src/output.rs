//! Result files written by the sync passes

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::OutputConfig;

/// The kinds of file a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Inserts,
    Updates,
    Log,
    Mappable,
}

/// Appends lines to the run's result files
#[derive(Debug, Clone)]
pub struct OutputFiles {
    config: OutputConfig,
}

impl OutputFiles {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Create the output directory if needed
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.config.dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.config.dir.display()
            )
        })
    }

    pub fn path(&self, kind: OutputKind) -> PathBuf {
        let name = match kind {
            OutputKind::Inserts => &self.config.insert_file,
            OutputKind::Updates => &self.config.update_file,
            OutputKind::Log => &self.config.log_file,
            OutputKind::Mappable => &self.config.mappable_file,
        };
        self.config.dir.join(name)
    }

    /// Append one line
    pub fn append(&self, kind: OutputKind, line: &str) -> Result<()> {
        let path = self.path(kind);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write output file: {}", path.display()))
    }

    /// Replace the file's contents with a failure message
    pub fn record_failure(&self, kind: OutputKind, message: &str) -> Result<()> {
        let path = self.path(kind);
        write_truncated(&path, message)
    }
}

fn write_truncated(path: &Path, message: &str) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;
    writeln!(file, "{}", message)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("extrafield-out-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_append_then_truncate() {
        let dir = temp_dir("append");
        let files = OutputFiles::new(OutputConfig {
            dir: dir.clone(),
            ..OutputConfig::default()
        });
        files.prepare().unwrap();

        files.append(OutputKind::Log, "first").unwrap();
        files.append(OutputKind::Log, "second").unwrap();
        let content = fs::read_to_string(files.path(OutputKind::Log)).unwrap();
        assert_eq!(content, "first\nsecond\n");

        files.record_failure(OutputKind::Log, "Database Error: boom").unwrap();
        let content = fs::read_to_string(files.path(OutputKind::Log)).unwrap();
        assert_eq!(content, "Database Error: boom\n");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_paths_use_configured_names() {
        let files = OutputFiles::new(OutputConfig::default());
        assert_eq!(
            files.path(OutputKind::Updates),
            PathBuf::from(".").join("UpdateQuery.txt")
        );
        assert_eq!(
            files.path(OutputKind::Mappable),
            PathBuf::from(".").join("Mappable_values.txt")
        );
    }
}
