//! # Spreadsheet Processing Module
//!
//! This module reads the supported source formats into tables: comma separated
//! text (.csv) and Excel workbooks (.xlsx, .xls). It owns file kind detection,
//! the raw cell model and the readers for each format.
use calamine::XlsError;
use calamine::XlsxError;
use std::fmt;
use std::fmt::Display;
use thiserror::Error;

pub mod cell;
mod delimited;
mod excel;

pub use cell::CellValue;
pub(crate) use delimited::read_csv;
pub(crate) use excel::rows_to_table;
pub(crate) use excel::Workbook;

/// Custom error types for spreadsheet operations.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Error in Excel 2007+ format (.xlsx)
    #[error("Invalid xlsx file format: {0}")]
    InvalidXlsxFileFormat(#[from] XlsxError),

    /// Error in legacy Excel format (.xls)
    #[error("Invalid xls file format: {0}")]
    InvalidXlsFileFormat(#[from] XlsError),

    /// Malformed delimited text
    #[error("{0}")]
    InvalidCsvContent(#[from] ::csv::Error),

    /// A workbook reader was requested for a non-workbook kind
    #[error("'{0}' files are not workbooks")]
    NotAWorkbook(FileKind),
}

/// Source file kinds accepted for ingestion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// Comma separated values (.csv)
    Csv,
    /// Excel 2007+ workbook (.xlsx)
    Xlsx,
    /// Legacy Excel workbook (.xls)
    Xls,
}

impl FileKind {
    /// Detects the file kind from the lowercase extension of a file name.
    ///
    /// A name without any `.` has no extension and is not recognized.
    ///
    /// # Arguments
    ///
    /// * `file_name` - The file name (not read, only inspected)
    ///
    /// # Returns
    ///
    /// * `Option<FileKind>` - The recognized kind, `None` for any other extension
    pub fn detect(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Returns the extension of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
        }
    }

    /// Checks if the kind is read through the workbook reader.
    pub const fn is_workbook(&self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
