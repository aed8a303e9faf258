use std::fmt;
use tracing::{debug, warn};

/// Cell text used for SQL NULL / absent values
pub const NULL_VALUE: &str = "NULL";

/// A single row of cell strings in source column order
pub type Row = Vec<String>;

/// Immutable snapshot of one table's rows and columns for the current session.
///
/// Column order is the source schema order. Rows are kept in the order the
/// provider returned them. Rows longer than the column count are truncated on
/// construction; shorter rows are kept as-is and consumers must bound their
/// indexing with `min(columns, row.len())`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
    /// Set when the provider returned exactly its row cap
    truncated: bool,
}

impl Dataset {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let name = name.into();
        let column_count = columns.len();
        let mut short_rows = 0usize;
        let mut long_rows = 0usize;

        let rows: Vec<Row> = rows
            .into_iter()
            .map(|mut row| {
                if row.len() > column_count {
                    long_rows += 1;
                    row.truncate(column_count);
                } else if row.len() < column_count {
                    short_rows += 1;
                }
                row
            })
            .collect();

        if short_rows > 0 || long_rows > 0 {
            warn!(
                target: "fetch",
                "Table '{}' has malformed rows: {} short, {} long (truncated)",
                name, short_rows, long_rows
            );
        }

        debug!(
            target: "fetch",
            "Dataset '{}' created with {} columns and {} rows",
            name,
            column_count,
            rows.len()
        );

        Self {
            name,
            columns,
            rows,
            truncated: false,
        }
    }

    /// Mark the dataset as possibly cut short by the provider's row cap
    pub fn with_row_cap(mut self, row_cap: usize) -> Self {
        self.truncated = row_cap > 0 && self.rows.len() >= row_cap;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Cell text, or `None` when the row is out of range or too short
    pub fn get_value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} columns, {} rows{})",
            self.name,
            self.columns.len(),
            self.rows.len(),
            if self.truncated { ", capped" } else { "" }
        )
    }
}

/// True when a cell holds the NULL sentinel
pub fn is_null(value: &str) -> bool {
    value == NULL_VALUE
}
