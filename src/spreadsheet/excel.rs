//! Microsoft Office Excel workbook reader (.xlsx and .xls).
use crate::spreadsheet::CellValue;
use crate::spreadsheet::FileKind;
use crate::spreadsheet::SpreadsheetError;
use crate::table::Record;
use crate::table::Table;
use calamine::Reader;
use calamine::Xls;
use calamine::Xlsx;
use std::io::Cursor;

/// Wrapper over the workbook readers of the supported Excel formats.
pub(crate) enum Workbook {
    /// Excel 2007+ format reader (.xlsx)
    Xlsx(Xlsx<Cursor<Vec<u8>>>),
    /// Legacy Excel format reader (.xls)
    Xls(Xls<Cursor<Vec<u8>>>),
}

impl Workbook {
    /// Opens a workbook from its raw bytes.
    ///
    /// # Arguments
    /// * `kind` - Detected file kind, must be a workbook kind
    /// * `bytes` - Raw file content
    ///
    /// # Returns
    /// * `Result<Workbook, SpreadsheetError>` - The reader, or the reason the content is not a valid workbook
    pub(crate) fn open(kind: FileKind, bytes: Vec<u8>) -> Result<Workbook, SpreadsheetError> {
        let cursor = Cursor::new(bytes);
        match kind {
            FileKind::Xlsx => Ok(Self::Xlsx(Xlsx::new(cursor)?)),
            FileKind::Xls => Ok(Self::Xls(Xls::new(cursor)?)),
            FileKind::Csv => Err(SpreadsheetError::NotAWorkbook(kind)),
        }
    }

    /// Returns the sheet names in workbook order.
    pub(crate) fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Xlsx(xlsx) => xlsx.sheet_names(),
            Self::Xls(xls) => xls.sheet_names(),
        }
    }

    /// Reads the first sheet as a rectangular array of rows, header row included.
    ///
    /// Cells are extracted by position, so row 0 holds the literal header values.
    ///
    /// # Returns
    /// * `Ok(None)` - The workbook has no sheets
    /// * `Ok(Some(rows))` - Rows of the first sheet (empty when the sheet has no cells)
    pub(crate) fn first_sheet_rows(&mut self) -> Result<Option<Vec<Vec<CellValue>>>, SpreadsheetError> {
        let range = match self {
            Self::Xlsx(xlsx) => xlsx.worksheet_range_at(0).transpose()?,
            Self::Xls(xls) => xls.worksheet_range_at(0).transpose()?,
        };
        Ok(range.map(|range| {
            range
                .rows()
                .map(|row| row.iter().map(CellValue::from).collect())
                .collect()
        }))
    }
}

/// Maps positional rows onto the header names of row 0.
///
/// Missing trailing cells become empty, and records whose every field is empty
/// are dropped. Returns `None` when there is not even a header row.
pub(crate) fn rows_to_table(rows: Vec<Vec<CellValue>>) -> Option<Table> {
    let mut rows = rows.into_iter();
    let columns: Vec<String> = rows.next()?.iter().map(CellValue::to_string).collect();

    let records = rows
        .map(|row| {
            let mut record = Record::new();
            for (index, column) in columns.iter().enumerate() {
                let value = row.get(index).cloned().unwrap_or_default();
                record.insert(column.to_owned(), value);
            }
            record
        })
        .filter(|record| !record.is_blank())
        .collect();
    Some(Table::new(columns, records))
}
