//! Delimited text reader.

use crate::spreadsheet::CellValue;
use crate::spreadsheet::SpreadsheetError;
use crate::table::Record;
use crate::table::Table;
use csv::ReaderBuilder;
use csv::StringRecord;
use encoding_rs::UTF_8;

/// Parses CSV content into a table, taking the first row as the header row.
///
/// Content is decoded as UTF-8 (a leading byte order mark is removed and
/// invalid sequences are replaced). Blank lines are skipped. Every record must
/// have as many fields as the header; the first record that does not aborts
/// the whole parse.
///
/// # Arguments
/// * `bytes` - Raw file content
///
/// # Returns
/// * `Result<Table, SpreadsheetError>` - Parsed table (possibly without rows), or the first parser error
pub(crate) fn read_csv(bytes: &[u8]) -> Result<Table, SpreadsheetError> {
    let (content, _, _) = UTF_8.decode(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_record(&columns, &record?));
    }
    Ok(Table::new(columns, rows))
}

/// Keys a CSV record by the header names (later duplicates overwrite earlier ones).
fn to_record(columns: &[String], record: &StringRecord) -> Record {
    let mut row = Record::new();
    for (column, value) in columns.iter().zip(record.iter()) {
        row.insert(column.to_owned(), CellValue::from_text(value));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = read_csv(b"name,age,city\nAlice,30,NYC\nBob,25,LA").unwrap();
        assert_eq!(table.columns(), ["name", "age", "city"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("name"), Some(&CellValue::Text("Alice".to_owned())));
        assert_eq!(table.rows()[1].get("age"), Some(&CellValue::Text("25".to_owned())));
    }

    #[test]
    fn skips_blank_lines() {
        let table = read_csv(b"a,b\n\n1,2\n\n\n3,4\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn strips_byte_order_mark() {
        let table = read_csv(b"\xEF\xBB\xBFmonth,sales\nJan,10\n").unwrap();
        assert_eq!(table.columns(), ["month", "sales"]);
    }

    #[test]
    fn empty_fields_are_empty_cells() {
        let table = read_csv(b"a,b\n1,\n").unwrap();
        assert_eq!(table.rows()[0].get("b"), Some(&CellValue::Empty));
    }

    #[test]
    fn unequal_field_count_fails() {
        let error = read_csv(b"a,b,c\n1,2,3\n4,5\n").unwrap_err();
        assert!(matches!(error, SpreadsheetError::InvalidCsvContent(_)));
        assert!(error.to_string().contains("found record with 2 fields"), "{}", error);
    }

    #[test]
    fn header_only_has_no_rows() {
        let table = read_csv(b"a,b\n").unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_header_last_write_wins() {
        let table = read_csv(b"k,k\nfirst,second\n").unwrap();
        assert_eq!(table.columns(), ["k", "k"]);
        assert_eq!(table.rows()[0].len(), 1);
        assert_eq!(table.rows()[0].get("k"), Some(&CellValue::Text("second".to_owned())));
    }
}
