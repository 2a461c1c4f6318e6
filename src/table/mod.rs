//! Normalized tabular data produced by ingestion.
use crate::spreadsheet::CellValue;
use serde::Serialize;

mod record;

pub use record::Record;

/// Default number of rows shown by a preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Represents the table read from one source file.
///
/// Column order and row order follow the source file. Column names are kept as
/// they appear, duplicates included.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Table {
    /// Column names in source order
    columns: Vec<String>,
    /// Records in source order
    rows: Vec<Record>,
}

/// First rows of a table with its dimensions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview<'a> {
    pub columns: &'a [String],
    pub rows: &'a [Record],
    /// Rows not included in the preview
    pub remaining_rows: usize,
    pub row_count: usize,
    pub column_count: usize,
}

impl Table {
    /// Creates a table from its columns and records.
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Table { columns, rows }
    }

    /// Returns the column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the records in source order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks if a name is one of the columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Returns the value of a field in the record at `row`.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|record| record.get(column))
    }

    /// Returns the first `limit` records together with the table dimensions.
    pub fn preview(&self, limit: usize) -> Preview<'_> {
        let shown = limit.min(self.rows.len());
        Preview {
            columns: &self.columns,
            rows: &self.rows[..shown],
            remaining_rows: self.rows.len() - shown,
            row_count: self.rows.len(),
            column_count: self.columns.len(),
        }
    }

    /// Splits the table into its columns and records.
    pub fn into_parts(self) -> (Vec<String>, Vec<Record>) {
        (self.columns, self.rows)
    }
}
