//! In-memory column source

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use super::ColumnSource;

/// Column source over fixed data, keyed by `(table, column)`
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    columns: HashMap<(String, String), Vec<Option<String>>>,
    /// Column whose reads fail, to exercise error paths
    failing: Option<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column with its stored values (NULLs as `None`)
    pub fn with_column<I, S>(mut self, table: &str, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.columns.insert(
            (table.to_string(), column.to_string()),
            values.into_iter().map(|v| v.map(Into::into)).collect(),
        );
        self
    }

    /// Make reads of a column fail with a database error
    pub fn failing_on(mut self, table: &str, column: &str) -> Self {
        self.failing = Some((table.to_string(), column.to_string()));
        self
    }
}

#[async_trait]
impl ColumnSource for MemorySource {
    async fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        Ok(self
            .columns
            .contains_key(&(table.to_string(), column.to_string())))
    }

    async fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<String>> {
        let key = (table.to_string(), column.to_string());
        if self.failing.as_ref() == Some(&key) {
            return Err(sqlx::Error::Protocol(format!(
                "relation \"{}\" read failed for column {}",
                table, column
            )))
            .with_context(|| format!("Failed to fetch distinct values of {}.{}", table, column));
        }

        let Some(values) = self.columns.get(&key) else {
            bail!("column \"{}\" does not exist", column);
        };

        let mut distinct: Vec<String> = Vec::new();
        for value in values.iter().flatten() {
            if !distinct.contains(value) {
                distinct.push(value.clone());
            }
        }
        Ok(distinct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_distinct_drops_nulls_and_duplicates() {
        let source = MemorySource::new().with_column(
            "candidate_custom_data",
            "custcolumn1",
            [Some("a"), None, Some("b"), Some("a")],
        );

        let values = source
            .distinct_values("candidate_custom_data", "custcolumn1")
            .await
            .unwrap();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_column() {
        let source = MemorySource::new();
        assert!(!source.column_exists("t", "c").await.unwrap());
        assert!(source.distinct_values("t", "c").await.is_err());
    }
}
