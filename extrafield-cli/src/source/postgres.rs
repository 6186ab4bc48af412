//! PostgreSQL-backed column source

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use super::ColumnSource;
use crate::config::DatabaseConfig;
use crate::sql::quote_ident;

/// Column source reading from a live PostgreSQL database
pub struct PgColumnSource {
    pool: PgPool,
    schema: String,
    database: String,
}

impl PgColumnSource {
    /// Connect using the configured credentials
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.server)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        log::info!(
            "Connecting to {}:{}/{} as {}",
            config.server,
            config.port,
            config.database,
            config.user
        );

        // Single pass, single operator: one connection is plenty
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to database {} on {}:{}",
                    config.database, config.server, config.port
                )
            })?;

        Ok(Self::from_pool(pool, &config.schema, &config.database))
    }

    pub fn from_pool(pool: PgPool, schema: &str, database: &str) -> Self {
        Self {
            pool,
            schema: schema.to_string(),
            database: database.to_string(),
        }
    }

    /// Close the pool, waiting for the connection to shut down
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ColumnSource for PgColumnSource {
    async fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT 1
            FROM information_schema.columns
            WHERE column_name = $1
              AND table_name = $2
              AND table_schema = $3
              AND table_catalog = $4
            "#,
        )
        .bind(column)
        .bind(table)
        .bind(&self.schema)
        .bind(&self.database)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to look up column {}.{}", table, column))?;

        Ok(row.is_some())
    }

    async fn distinct_values(&self, table: &str, column: &str) -> Result<Vec<String>> {
        let query = format!(
            "SELECT DISTINCT {}::text FROM {}.{}",
            quote_ident(column),
            quote_ident(&self.schema),
            quote_ident(table)
        );
        log::debug!("{}", query);

        let rows: Vec<(Option<String>,)> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch distinct values of {}.{}", table, column))?;

        Ok(rows.into_iter().filter_map(|(value,)| value).collect())
    }
}
