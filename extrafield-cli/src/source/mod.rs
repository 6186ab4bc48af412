//! Where observed column values come from

#[cfg(test)]
pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
pub use memory::MemorySource;
pub use postgres::PgColumnSource;

/// Read access to the custom-data tables
#[async_trait]
pub trait ColumnSource: Send + Sync {
    /// Whether `table` has a column named `column`
    async fn column_exists(&self, table: &str, column: &str) -> Result<bool>;

    /// Distinct non-NULL values of `column`, as text
    async fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<String>>;
}
