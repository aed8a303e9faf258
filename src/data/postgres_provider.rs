use anyhow::{anyhow, Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Row as _;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::config::db_config::DbConfig;
use crate::data::data_provider::{DataProvider, TableData};
use crate::data::datatable::NULL_VALUE;

const LIST_TABLES_SQL: &str = "SELECT schemaname, tablename, \
     pg_catalog.pg_table_is_visible(format('%I.%I', schemaname, tablename)::regclass) \
     FROM pg_catalog.pg_tables \
     WHERE schemaname NOT IN ('pg_catalog', 'information_schema') \
     ORDER BY tablename, schemaname";

const LIST_COLUMNS_SQL: &str = "SELECT column_name FROM information_schema.columns \
     WHERE table_schema = $1 AND table_name = $2 \
     ORDER BY ordinal_position";

// Schema of the table an unqualified name resolves to through search_path
const RESOLVE_TABLE_SQL: &str = "SELECT n.nspname FROM pg_catalog.pg_class c \
     JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace \
     WHERE c.relname = $1 AND c.relkind IN ('r', 'p') \
     AND pg_catalog.pg_table_is_visible(c.oid)";

/// A table located in a specific schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// `"schema"."table"` for use in SQL
    pub fn sql_name(&self) -> String {
        format!(
            "{}.{}",
            quote_identifier(&self.schema),
            quote_identifier(&self.name)
        )
    }
}

/// Assign each table the label shown in the table list.
///
/// Tables reachable through `search_path` keep their bare name. Every other
/// table is shown as `schema.table`, so two schemas holding the same table
/// name never produce duplicate labels. Input order is preserved.
pub fn label_tables(tables: Vec<(TableRef, bool)>) -> Vec<(String, TableRef)> {
    let mut seen = HashSet::new();
    tables
        .into_iter()
        .filter_map(|(table, visible)| {
            let label = if visible {
                table.name.clone()
            } else {
                format!("{}.{}", table.schema, table.name)
            };
            seen.insert(label.clone()).then_some((label, table))
        })
        .collect()
}

/// PostgreSQL-backed provider.
///
/// Owns a single-threaded tokio runtime and blocks on each query, so at most
/// one fetch is in flight at any time.
pub struct PostgresProvider {
    runtime: Runtime,
    pool: PgPool,
    row_limit: usize,
    details: String,
    tables: HashMap<String, TableRef>,
}

impl std::fmt::Debug for PostgresProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresProvider")
            .field("details", &self.details)
            .field("row_limit", &self.row_limit)
            .finish()
    }
}

impl PostgresProvider {
    /// Connect using the resolved database configuration
    pub fn connect(config: &DbConfig, row_limit: usize, timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start database runtime")?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        info!(target: "fetch", "Connecting to {}", config.connection_details());

        let pool = runtime
            .block_on(
                PgPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(timeout)
                    .connect_with(options),
            )
            .with_context(|| format!("failed to connect to database {}", config.connection_details()))?;

        Ok(Self {
            runtime,
            pool,
            row_limit,
            details: config.connection_details(),
            tables: HashMap::new(),
        })
    }

    fn columns_for(&self, table: &TableRef) -> Result<Vec<String>> {
        let rows = self
            .runtime
            .block_on(
                sqlx::query(LIST_COLUMNS_SQL)
                    .bind(&table.schema)
                    .bind(&table.name)
                    .fetch_all(&self.pool),
            )
            .with_context(|| format!("failed to read columns of {}", table.sql_name()))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>(0).map_err(Into::into))
            .collect()
    }

    /// Map a list label back to its table, asking the server for names never listed
    fn resolve(&self, label: &str) -> Result<TableRef> {
        if let Some(table) = self.tables.get(label) {
            return Ok(table.clone());
        }

        let row = self
            .runtime
            .block_on(
                sqlx::query(RESOLVE_TABLE_SQL)
                    .bind(label)
                    .fetch_optional(&self.pool),
            )
            .with_context(|| format!("failed to resolve table {}", label))?
            .ok_or_else(|| anyhow!("table {} not found", label))?;
        Ok(TableRef::new(row.try_get::<String, _>(0)?, label))
    }
}

/// Double-quote an identifier, doubling any embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the capped row query casting every column to text
pub fn build_select_sql(table: &TableRef, columns: &[String], row_limit: usize) -> String {
    let select_list = columns
        .iter()
        .map(|c| format!("{}::text", quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {} FROM {} LIMIT {}",
        select_list,
        table.sql_name(),
        row_limit
    )
}

impl DataProvider for PostgresProvider {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows = self
            .runtime
            .block_on(sqlx::query(LIST_TABLES_SQL).fetch_all(&self.pool))
            .context("failed to list tables")?;

        let tables = rows
            .iter()
            .map(|row| {
                Ok((
                    TableRef::new(row.try_get::<String, _>(0)?, row.try_get::<String, _>(1)?),
                    row.try_get::<bool, _>(2)?,
                ))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let labelled = label_tables(tables);
        debug!(target: "fetch", "Found {} tables", labelled.len());
        let labels = labelled.iter().map(|(label, _)| label.clone()).collect();
        self.tables = labelled.into_iter().collect();
        Ok(labels)
    }

    fn fetch_rows(&mut self, label: &str) -> Result<TableData> {
        let table = self.resolve(label)?;
        let columns = self.columns_for(&table)?;
        if columns.is_empty() {
            return Ok(TableData {
                columns,
                rows: Vec::new(),
            });
        }

        let sql = build_select_sql(&table, &columns, self.row_limit);
        debug!(target: "fetch", "Executing: {}", sql);

        let pg_rows = self
            .runtime
            .block_on(sqlx::query(&sql).fetch_all(&self.pool))
            .with_context(|| format!("failed to fetch rows of {}", label))?;

        let mut rows = Vec::with_capacity(pg_rows.len());
        for pg_row in &pg_rows {
            let mut row = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                let value: Option<String> = pg_row.try_get(i)?;
                row.push(value.unwrap_or_else(|| NULL_VALUE.to_string()));
            }
            rows.push(row);
        }

        info!(target: "fetch", "Fetched {} rows from {}", rows.len(), table.sql_name());
        Ok(TableData { columns, rows })
    }

    fn row_limit(&self) -> usize {
        self.row_limit
    }

    fn describe(&self) -> String {
        self.details.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_build_select_sql_is_schema_qualified() {
        let columns = vec!["id".to_string(), "Name".to_string()];
        assert_eq!(
            build_select_sql(&TableRef::new("public", "people"), &columns, 1000),
            "SELECT \"id\"::text, \"Name\"::text FROM \"public\".\"people\" LIMIT 1000"
        );
    }

    #[test]
    fn test_same_name_in_two_schemas_gets_distinct_labels() {
        let labelled = label_tables(vec![
            (TableRef::new("audit", "only_here"), false),
            (TableRef::new("audit", "users"), false),
            (TableRef::new("public", "users"), true),
        ]);
        let labels: Vec<&str> = labelled.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["audit.only_here", "audit.users", "users"]);

        let map: HashMap<String, TableRef> = labelled.into_iter().collect();
        assert_eq!(map["users"], TableRef::new("public", "users"));
        assert_eq!(map["audit.users"].sql_name(), "\"audit\".\"users\"");
    }

    #[test]
    fn test_column_lookup_is_scoped_to_one_schema() {
        assert!(LIST_COLUMNS_SQL.contains("table_schema = $1 AND table_name = $2"));
    }

    #[test]
    fn test_duplicate_labels_keep_first() {
        let labelled = label_tables(vec![
            (TableRef::new("public", "a.b"), true),
            (TableRef::new("a", "b"), false),
        ]);
        assert_eq!(labelled.len(), 1);
        assert_eq!(labelled[0].1, TableRef::new("public", "a.b"));
    }
}
