//! # Ingestion Pipeline
//!
//! Turns a named file into a [`Table`] or a diagnostic error, never both.
//!
//! 1. The kind is detected from the file name; unsupported names are rejected
//!    before any byte is read.
//! 2. CSV content goes through the delimited reader; `.xlsx` and `.xls` content
//!    through the workbook reader (first sheet only).
//! 3. Empty results are reported as errors rather than empty tables.
//!
//! Error messages are part of the caller contract and are rendered verbatim by
//! [`IngestError`]'s `Display` implementation.
use crate::helpers::reader::FileSource;
use crate::spreadsheet::read_csv;
use crate::spreadsheet::rows_to_table;
use crate::spreadsheet::FileKind;
use crate::spreadsheet::Workbook;
use crate::table::Record;
use crate::table::Table;
use crate::table::DEFAULT_PREVIEW_ROWS;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

mod pipeline;

pub use pipeline::IngestionPipeline;
pub use pipeline::PendingIngest;
pub use pipeline::PipelineBusy;

/// Default advisory upload limit (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Errors surfaced to the caller when a file cannot be turned into a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Unsupported file format. Please upload CSV or Excel files.")]
    UnsupportedFormat,

    /// First error reported by the CSV parser
    #[error("{0}")]
    CsvParse(String),

    #[error("No data found in CSV file")]
    EmptyCsv,

    #[error("No worksheets found in Excel file")]
    NoWorksheets,

    #[error("No data found in Excel file")]
    EmptyWorkbook,

    #[error("Error reading file")]
    Read,

    #[error("Error parsing Excel file: {0}")]
    WorkbookParse(String),
}

/// Broad classes of ingestion failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unsupported extension, detected before any parse attempt
    FormatRejection,
    /// Parsing succeeded but yielded no rows
    EmptyResult,
    /// Malformed CSV or workbook content
    ParseFailure,
    /// The file could not be read at all
    IoFailure,
}

impl IngestError {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFormat => ErrorCategory::FormatRejection,
            Self::EmptyCsv | Self::NoWorksheets | Self::EmptyWorkbook => ErrorCategory::EmptyResult,
            Self::CsvParse(_) | Self::WorkbookParse(_) => ErrorCategory::ParseFailure,
            Self::Read => ErrorCategory::IoFailure,
        }
    }
}

impl Serialize for IngestError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Options controlling ingestion.
#[derive(Clone, Debug)]
pub struct IngestOptions {
    /// Advisory size limit; larger files are still parsed but logged
    pub max_file_bytes: u64,
    /// Rows shown by a data preview
    pub preview_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }
}

/// Outcome of one ingestion attempt.
///
/// Either a populated table without error, or an empty table with an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IngestResult {
    #[serde(flatten)]
    table: Table,
    error: Option<IngestError>,
}

impl IngestResult {
    pub fn success(table: Table) -> Self {
        IngestResult { table, error: None }
    }

    pub fn failure(error: IngestError) -> Self {
        IngestResult {
            table: Table::default(),
            error: Some(error),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    pub fn rows(&self) -> &[Record] {
        self.table.rows()
    }

    pub fn error(&self) -> Option<&IngestError> {
        self.error.as_ref()
    }

    /// Returns the user-facing error message, if the attempt failed.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(IngestError::to_string)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.table.is_empty()
    }

    pub fn into_result(self) -> Result<Table, IngestError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.table),
        }
    }
}

impl From<Result<Table, IngestError>> for IngestResult {
    fn from(result: Result<Table, IngestError>) -> Self {
        match result {
            Ok(table) => IngestResult::success(table),
            Err(error) => IngestResult::failure(error),
        }
    }
}

/// Ingests one file.
///
/// # Arguments
/// * `source` - The file to read
/// * `options` - Ingestion options
///
/// # Returns
/// * `IngestResult` - The table, or the error explaining why there is none
pub fn ingest(source: &FileSource, options: &IngestOptions) -> IngestResult {
    load_table(source, options).into()
}

/// Ingests one file, returning the table or the ingestion error.
pub fn load_table(source: &FileSource, options: &IngestOptions) -> Result<Table, IngestError> {
    let name = source.name();
    let kind = FileKind::detect(&name).ok_or_else(|| {
        warn!(file = %name, "rejected file with unsupported extension");
        IngestError::UnsupportedFormat
    })?;

    if let Some(size) = source.size_hint().filter(|size| *size > options.max_file_bytes) {
        warn!(file = %name, size, limit = options.max_file_bytes, "file exceeds the advisory size limit");
    }

    let bytes = source.read_bytes().map_err(|error| {
        warn!(file = %name, %error, "failed to read file");
        IngestError::Read
    })?;
    debug!(file = %name, %kind, size = bytes.len(), "parsing file");

    let table = match kind {
        FileKind::Csv => parse_csv(&bytes)?,
        FileKind::Xlsx | FileKind::Xls => parse_workbook(kind, bytes)?,
    };
    info!(
        file = %name,
        rows = table.len(),
        columns = table.columns().len(),
        "ingested file"
    );
    Ok(table)
}

fn parse_csv(bytes: &[u8]) -> Result<Table, IngestError> {
    let table = read_csv(bytes).map_err(|error| IngestError::CsvParse(error.to_string()))?;
    if table.is_empty() {
        Err(IngestError::EmptyCsv)
    } else {
        Ok(table)
    }
}

fn parse_workbook(kind: FileKind, bytes: Vec<u8>) -> Result<Table, IngestError> {
    let parse_error = |error: crate::spreadsheet::SpreadsheetError| IngestError::WorkbookParse(error.to_string());

    let mut workbook = Workbook::open(kind, bytes).map_err(parse_error)?;
    debug!(sheets = ?workbook.sheet_names(), "opened workbook");
    let rows = workbook
        .first_sheet_rows()
        .map_err(parse_error)?
        .ok_or(IngestError::NoWorksheets)?;

    // A header row without any non-blank record counts as no data
    rows_to_table(rows)
        .filter(|table| !table.is_empty())
        .ok_or(IngestError::EmptyWorkbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::CellValue;

    #[test]
    fn unsupported_extension_is_rejected_without_reading() {
        // The path does not exist, so any read attempt would report a read error
        let source = FileSource::local("/definitely/missing/data.txt");
        let result = ingest(&source, &IngestOptions::default());
        assert_eq!(result.error(), Some(&IngestError::UnsupportedFormat));
        assert_eq!(
            result.error_message().as_deref(),
            Some("Unsupported file format. Please upload CSV or Excel files.")
        );
        assert!(result.columns().is_empty());
        assert!(result.rows().is_empty());
    }

    #[test]
    fn read_fault_is_reported() {
        let source = FileSource::local("/definitely/missing/data.csv");
        let result = ingest(&source, &IngestOptions::default());
        assert_eq!(result.error_message().as_deref(), Some("Error reading file"));
        assert_eq!(result.error().unwrap().category(), ErrorCategory::IoFailure);
    }

    #[test]
    fn csv_success() {
        let source = FileSource::memory("sales.csv", "month,sales\nJan,10\nFeb,bad\n");
        let result = ingest(&source, &IngestOptions::default());
        assert!(result.is_success());
        assert_eq!(result.columns(), ["month", "sales"]);
        assert_eq!(result.rows().len(), 2);
        assert_eq!(result.rows()[1].get("sales"), Some(&CellValue::from_text("bad")));
    }

    #[test]
    fn csv_without_rows() {
        let source = FileSource::memory("empty.csv", "month,sales\n\n");
        let result = ingest(&source, &IngestOptions::default());
        assert_eq!(result.error(), Some(&IngestError::EmptyCsv));
        assert_eq!(result.error().unwrap().category(), ErrorCategory::EmptyResult);
        assert!(result.columns().is_empty());
    }

    #[test]
    fn csv_parse_error_discards_rows() {
        let source = FileSource::memory("bad.csv", "a,b\n1,2\n3\n4,5\n");
        let result = ingest(&source, &IngestOptions::default());
        let error = result.error().unwrap();
        assert!(matches!(error, IngestError::CsvParse(_)));
        assert_eq!(error.category(), ErrorCategory::ParseFailure);
        assert!(result.rows().is_empty());
        assert!(result.columns().is_empty());
    }

    #[test]
    fn malformed_workbook() {
        let source = FileSource::memory("broken.xlsx", b"PK but not really".to_vec());
        let result = ingest(&source, &IngestOptions::default());
        let message = result.error_message().unwrap();
        assert!(message.starts_with("Error parsing Excel file: "), "{}", message);
    }

    #[test]
    fn serializes_as_table_with_error() {
        let result = IngestResult::failure(IngestError::NoWorksheets);
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"columns":[],"rows":[],"error":"No worksheets found in Excel file"}"#
        );
    }
}
