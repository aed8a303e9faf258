//! Data provider traits for abstracting data access
//!
//! This module defines the contract the navigation core consumes to list
//! tables and fetch rows, without knowing the underlying implementation
//! (PostgreSQL, in-memory demo data, test doubles).

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::data::datatable::{Row, NULL_VALUE};

/// Default upstream row cap applied by providers
pub const DEFAULT_ROW_LIMIT: usize = 1000;

/// Rows and column names returned by a fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Read-only access to a relational data source.
///
/// Calls block until the result is available. Implementations enforce their
/// own row cap so a fetch never returns an unbounded result.
pub trait DataProvider: Debug {
    /// Names of the browsable tables, in display order
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Rows and columns of a table, capped at `row_limit()`
    fn fetch_rows(&mut self, table: &str) -> Result<TableData>;

    /// Upstream row cap enforced by `fetch_rows`
    fn row_limit(&self) -> usize {
        DEFAULT_ROW_LIMIT
    }

    /// Human readable connection description for the header badge
    fn describe(&self) -> String;
}

/// In-memory provider used by `--demo` and tests
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    tables: BTreeMap<String, TableData>,
    row_limit: usize,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    /// Add a table; later calls with the same name replace it
    pub fn with_table(mut self, name: &str, columns: &[&str], rows: Vec<Vec<&str>>) -> Self {
        let data = TableData {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
        };
        self.tables.insert(name.to_string(), data);
        self
    }

    /// Add a table from owned data
    pub fn with_table_data(mut self, name: &str, data: TableData) -> Self {
        self.tables.insert(name.to_string(), data);
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// A small sample schema for trying the browser without a database
    pub fn demo() -> Self {
        let mut orders = Vec::new();
        let products = ["keyboard", "monitor", "mouse", "laptop stand", "usb hub"];
        for i in 1..=120usize {
            orders.push(vec![
                i.to_string(),
                (i % 4 + 1).to_string(),
                products[i % products.len()].to_string(),
                (i % 3 + 1).to_string(),
                format!("{}.{:02}", 10 + (i * 7) % 90, (i * 13) % 100),
                if i % 11 == 0 {
                    NULL_VALUE.to_string()
                } else {
                    format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1)
                },
            ]);
        }

        Self::new()
            .with_table(
                "customers",
                &["id", "name", "email", "city", "signup_date", "notes"],
                vec![
                    vec!["1", "Alice Moreau", "alice@example.com", "Lyon", "2023-02-11", NULL_VALUE],
                    vec!["2", "Bob Jensen", "bob@example.com", "Aarhus", "2023-05-30", "prefers email"],
                    vec!["3", "Chiara Rossi", "chiara@example.com", "Torino", "2024-01-07", NULL_VALUE],
                    vec!["4", "Dmitri Volkov", "dmitri@example.com", "Riga", "2024-03-19", "vip"],
                ],
            )
            .with_table_data(
                "orders",
                TableData {
                    columns: ["id", "customer_id", "product", "quantity", "price", "shipped_at"]
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                    rows: orders,
                },
            )
            .with_table("audit_log", &["id", "event", "payload"], Vec::new())
    }
}

impl DataProvider for MemoryProvider {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn fetch_rows(&mut self, table: &str) -> Result<TableData> {
        let data = self
            .tables
            .get(table)
            .ok_or_else(|| anyhow!("relation \"{}\" does not exist", table))?;

        Ok(TableData {
            columns: data.columns.clone(),
            rows: data.rows.iter().take(self.row_limit).cloned().collect(),
        })
    }

    fn row_limit(&self) -> usize {
        self.row_limit
    }

    fn describe(&self) -> String {
        format!("in-memory ({} tables)", self.tables.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_basics() {
        let mut provider = MemoryProvider::new().with_table(
            "users",
            &["ID", "Name", "Age"],
            vec![vec!["1", "Alice", "30"], vec!["2", "Bob", "25"]],
        );

        assert_eq!(provider.list_tables().unwrap(), vec!["users"]);
        let data = provider.fetch_rows("users").unwrap();
        assert_eq!(data.columns, vec!["ID", "Name", "Age"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[1][1], "Bob");
    }

    #[test]
    fn test_unknown_table_is_error() {
        let mut provider = MemoryProvider::new();
        assert!(provider.fetch_rows("missing").is_err());
    }

    #[test]
    fn test_row_limit_truncates() {
        let rows = (0..10).map(|_| vec!["x"]).collect();
        let mut provider = MemoryProvider::new()
            .with_table("t", &["c"], rows)
            .with_row_limit(3);
        assert_eq!(provider.fetch_rows("t").unwrap().rows.len(), 3);
        assert_eq!(provider.row_limit(), 3);
    }

    #[test]
    fn test_demo_tables_are_sorted() {
        let mut provider = MemoryProvider::demo();
        assert_eq!(
            provider.list_tables().unwrap(),
            vec!["audit_log", "customers", "orders"]
        );
        assert!(provider.fetch_rows("audit_log").unwrap().rows.is_empty());
    }
}
