use crate::helpers::number::parse_leading_float;
use calamine::Data;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;

/// Raw value of a single table cell.
///
/// CSV fields are always text; workbook cells keep their native kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    /// Empty cell, empty CSV field or missing trailing cell
    #[default]
    Empty,
    /// Boolean values (true/false)
    Bool(bool),
    /// Numeric values
    Number(f64),
    /// Text values
    Text(String),
}

impl CellValue {
    /// Wraps a text value, treating the empty string as an empty cell.
    pub fn from_text<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Returns true if the cell holds no data.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Reads the cell as a finite number.
    ///
    /// Text is read by its leading numeric literal; booleans and empty cells
    /// have no numeric reading.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value).filter(|value| value.is_finite()),
            CellValue::Text(value) => parse_leading_float(value),
            CellValue::Bool(_) | CellValue::Empty => None,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Bool(value) => serializer.serialize_bool(*value),
            CellValue::Number(value) => serializer.serialize_f64(*value),
            CellValue::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<&Data> for CellValue {
    /// Converts a workbook cell, formatting date cells as ISO text.
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => CellValue::Empty,
            Data::Bool(value) => CellValue::Bool(*value),
            Data::Int(value) => CellValue::Number(*value as f64),
            Data::Float(value) => CellValue::Number(*value),
            Data::String(value) => CellValue::from_text(value.as_str()),
            Data::DateTime(value) => match value.as_datetime() {
                Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                    CellValue::Text(datetime.format("%Y-%m-%d").to_string())
                }
                Some(datetime) => CellValue::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
                None => CellValue::Number(value.as_f64()),
            },
            Data::DateTimeIso(value) => CellValue::from_text(value.as_str()),
            Data::DurationIso(value) => CellValue::from_text(value.as_str()),
            Data::Error(error) => CellValue::Text(error.to_string()),
        }
    }
}
