use crate::chart::ChartKind;
use regex::Regex;

/// Suggests a chart kind from the column names alone.
///
/// A time-like column (`date`, `time`, `year`) suggests a line chart; at least
/// two measure-like columns (`amount`, `value`, `price`, `count`) suggest a
/// scatter plot; anything else falls back to a bar chart. Matching is
/// case-insensitive and looks for the words anywhere in the name.
pub fn recommend_chart_kind<S: AsRef<str>>(columns: &[S]) -> ChartKind {
    let time = Regex::new(r"(?i)date|time|year").expect("Hardcode regex pattern");
    let measure = Regex::new(r"(?i)amount|value|price|count").expect("Hardcode regex pattern");

    if columns.iter().any(|column| time.is_match(column.as_ref())) {
        ChartKind::Line
    } else if columns.iter().filter(|column| measure.is_match(column.as_ref())).count() >= 2 {
        ChartKind::Scatter
    } else {
        ChartKind::Bar
    }
}
