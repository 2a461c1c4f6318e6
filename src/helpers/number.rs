//! Numeric coercion used by the chart transformations.
//!
//! Cells are coerced with a lossy policy: read the longest numeric
//! prefix of the value as a floating point number, and substitute `0` whenever
//! nothing numeric (or nothing finite) can be read.

use crate::spreadsheet::CellValue;

/// Parses the leading floating point literal of a string.
///
/// Leading whitespace is skipped and parsing stops at the first character that
/// cannot extend the literal, so `"12.5kg"` reads as `12.5` and `"3e2x"` as `300`.
/// Only finite values are returned.
///
/// # Arguments
/// * `text` - The raw text to parse
///
/// # Returns
/// * `Option<f64>` - The parsed prefix, or `None` when no digits lead the text
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;

    let mut fraction_digits = 0usize;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+') | Some(b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent..]);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Coerces a raw cell into a number, substituting `0` on failure.
///
/// Missing cells, empty cells, booleans and non-numeric text all become `0`.
pub fn coerce_numeric(raw: Option<&CellValue>) -> f64 {
    raw.and_then(CellValue::to_number).unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}
