//! Configuration: optional TOML file, overridden by environment variables
//!
//! The environment is normally populated from a `.env` file in the working
//! directory (see `main`).

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default PostgreSQL port
pub const DEFAULT_PORT: u16 = 5432;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub output: OutputConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub server: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub schema: String,
    pub port: u16,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
            schema: "public".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Where result files are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// INSERT statements from the generate pass
    pub insert_file: String,
    /// UPDATE statements from the update pass
    pub update_file: String,
    /// Existing/new value log from the update pass
    pub log_file: String,
    /// Case-insensitive near-duplicates from the update pass
    pub mappable_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            insert_file: "ExtrafieldQuery.txt".to_string(),
            update_file: "UpdateQuery.txt".to_string(),
            log_file: "Log.txt".to_string(),
            mappable_file: "Mappable_values.txt".to_string(),
        }
    }
}

impl Config {
    /// Load the TOML file (when given) and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Override settings from environment variables
    ///
    /// `lookup` returns the variable's value; empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("PGSQL_SERVER") {
            self.database.server = v;
        }
        if let Some(v) = get("PGSQL_DATABASE") {
            self.database.database = v;
        }
        if let Some(v) = get("PGSQL_USER") {
            self.database.user = v;
        }
        if let Some(v) = get("PGSQL_PASSWORD") {
            self.database.password = v;
        }
        // Older .env files spell it in mixed case
        if let Some(v) = get("PGSQL_SCHEMA").or_else(|| get("PGSQL_schema")) {
            self.database.schema = v;
        }
        if let Some(v) = get("PGSQL_PORT") {
            self.database.port = v
                .trim()
                .parse()
                .with_context(|| format!("PGSQL_PORT is not a valid port: {}", v))?;
        }
        if let Some(v) = get("OUTPUT_DIR") {
            self.output.dir = PathBuf::from(v);
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Fail with the list of settings that are still empty
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("PGSQL_SERVER", &self.server),
            ("PGSQL_DATABASE", &self.database),
            ("PGSQL_USER", &self.user),
            ("PGSQL_SCHEMA", &self.schema),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            bail!("Missing database settings: {}", missing.join(", "));
        }
        Ok(())
    }
}
