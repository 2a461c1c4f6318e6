//! Reshapes a table into the data shape each chart kind is drawn from.
//!
//! Every transformation is a pure function of the table and the request. Values
//! are read with [`coerce_numeric`], so malformed cells become `0` instead of
//! errors, and unknown field names behave like missing cells.
use crate::chart::palette::extended_palette_color;
use crate::chart::palette::palette_color;
use crate::chart::ChartKind;
use crate::helpers::number::coerce_numeric;
use crate::spreadsheet::CellValue;
use crate::table::Record;
use crate::table::Table;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

/// Rows kept by the radar transformation.
pub const RADAR_ROW_LIMIT: usize = 5;
/// Numeric columns kept by the radar transformation.
pub const RADAR_SERIES_LIMIT: usize = 3;
/// Key of the label in a serialized radar entry.
pub const RADAR_LABEL_KEY: &str = "label";
/// Rows kept by the radial bar transformation.
pub const RADIAL_BAR_ROW_LIMIT: usize = 6;

/// The chart kind and axis mapping chosen by the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub chart_kind: ChartKind,
    /// Column used as category / label
    pub x_field: String,
    /// Column used as the primary numeric value
    pub y_field: String,
}

impl ChartRequest {
    pub fn new<X: Into<String>, Y: Into<String>>(chart_kind: ChartKind, x_field: X, y_field: Y) -> Self {
        ChartRequest {
            chart_kind,
            x_field: x_field.into(),
            y_field: y_field.into(),
        }
    }
}

/// Label and value of one entry (bar, line, scatter, area, composed).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<CellValue>,
    pub value: f64,
}

/// Entry with a palette color (pie, donut, funnel).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColoredPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<CellValue>,
    pub value: f64,
    pub color: &'static str,
}

/// One radar entry: a label and one value per detected numeric series.
#[derive(Clone, Debug, PartialEq)]
pub struct RadarEntry {
    pub label: Option<CellValue>,
    /// `(series, value)` pairs in series order
    pub values: Vec<(String, f64)>,
}

/// Radar data with the numeric series it was built from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RadarDataset {
    pub series: Vec<String>,
    pub entries: Vec<RadarEntry>,
}

/// Treemap node with a strictly positive area.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreemapNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<CellValue>,
    pub size: f64,
    pub color: &'static str,
}

/// Radial bar entry with its share of the largest value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RadialBarEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<CellValue>,
    pub value: f64,
    pub color: &'static str,
    pub percentage: f64,
}

/// Chart-ready data; the shape depends on the chart kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartDataset {
    /// Bar, line, scatter, area and composed charts
    Series(Vec<ChartPoint>),
    /// Pie, donut and funnel charts
    Colored(Vec<ColoredPoint>),
    Radar(RadarDataset),
    Treemap(Vec<TreemapNode>),
    RadialBar(Vec<RadialBarEntry>),
}

impl ChartDataset {
    /// Number of entries in the dataset.
    pub fn len(&self) -> usize {
        match self {
            Self::Series(points) => points.len(),
            Self::Colored(points) => points.len(),
            Self::Radar(radar) => radar.entries.len(),
            Self::Treemap(nodes) => nodes.len(),
            Self::RadialBar(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for RadarEntry {
    /// Serializes as a flat object: `{"label": ..., "<series>": value, ...}`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(label) = &self.label {
            map.serialize_entry(RADAR_LABEL_KEY, label)?;
        }
        for (series, value) in &self.values {
            map.serialize_entry(series, value)?;
        }
        map.end()
    }
}

/// Builds the dataset for a chart request.
///
/// The request's fields are not validated against the table columns.
///
/// # Arguments
/// * `table` - Ingested table
/// * `request` - Chart kind and axis fields
///
/// # Returns
/// * `ChartDataset` - Data shaped for the requested chart kind
pub fn transform(table: &Table, request: &ChartRequest) -> ChartDataset {
    let x = request.x_field.as_str();
    let y = request.y_field.as_str();
    match request.chart_kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Scatter | ChartKind::Area | ChartKind::Composed => {
            ChartDataset::Series(series_points(table, x, y))
        }
        ChartKind::Pie | ChartKind::Donut | ChartKind::Funnel => {
            ChartDataset::Colored(colored_points(table, x, y))
        }
        ChartKind::Radar => ChartDataset::Radar(radar_dataset(table, x)),
        ChartKind::Treemap => ChartDataset::Treemap(treemap_nodes(table, x, y)),
        ChartKind::RadialBar => ChartDataset::RadialBar(radial_bar_entries(table, x, y)),
    }
}

/// Base transformation: raw label and coerced value of every row.
pub fn series_points(table: &Table, x: &str, y: &str) -> Vec<ChartPoint> {
    table
        .rows()
        .iter()
        .map(|record| ChartPoint {
            label: label(record, x),
            value: coerce_numeric(record.get(y)),
        })
        .collect()
}

/// Base transformation plus a [`PALETTE`](crate::chart::palette::PALETTE) color by row index.
pub fn colored_points(table: &Table, x: &str, y: &str) -> Vec<ColoredPoint> {
    series_points(table, x, y)
        .into_iter()
        .enumerate()
        .map(|(index, point)| ColoredPoint {
            label: point.label,
            value: point.value,
            color: palette_color(index),
        })
        .collect()
}

/// Columns whose value in the first row reads as a finite number, in column
/// order, without repeats and capped at [`RADAR_SERIES_LIMIT`].
///
/// A column named `label` is never a series: radar entries are flat objects
/// and that key holds the entry label.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    let Some(first) = table.rows().first() else {
        return Vec::new();
    };
    let mut series: Vec<String> = Vec::new();
    for column in table.columns() {
        if series.len() == RADAR_SERIES_LIMIT {
            break;
        }
        if column == RADAR_LABEL_KEY || series.contains(column) {
            continue;
        }
        if first.get(column).and_then(CellValue::to_number).is_some() {
            series.push(column.to_owned());
        }
    }
    series
}

/// Radar transformation over the first [`RADAR_ROW_LIMIT`] rows.
pub fn radar_dataset(table: &Table, x: &str) -> RadarDataset {
    let series = numeric_columns(table);
    let entries = table
        .rows()
        .iter()
        .take(RADAR_ROW_LIMIT)
        .map(|record| RadarEntry {
            label: label(record, x),
            values: series
                .iter()
                .map(|column| (column.to_owned(), coerce_numeric(record.get(column))))
                .collect(),
        })
        .collect();
    RadarDataset { series, entries }
}

/// Treemap transformation: size is the absolute value, `1` when it would be `0`.
pub fn treemap_nodes(table: &Table, x: &str, y: &str) -> Vec<TreemapNode> {
    series_points(table, x, y)
        .into_iter()
        .enumerate()
        .map(|(index, point)| TreemapNode {
            label: point.label,
            size: treemap_size(point.value),
            color: extended_palette_color(index),
        })
        .collect()
}

/// Radial bar transformation over the first [`RADIAL_BAR_ROW_LIMIT`] rows.
///
/// Percentages are relative to the largest value of the whole table. When that
/// maximum is `0` every percentage is `0`.
pub fn radial_bar_entries(table: &Table, x: &str, y: &str) -> Vec<RadialBarEntry> {
    let points = series_points(table, x, y);
    let max_value = points
        .iter()
        .map(|point| point.value)
        .fold(f64::NEG_INFINITY, f64::max);

    points
        .into_iter()
        .take(RADIAL_BAR_ROW_LIMIT)
        .enumerate()
        .map(|(index, point)| RadialBarEntry {
            label: point.label,
            value: point.value,
            color: extended_palette_color(index),
            percentage: percentage(point.value, max_value),
        })
        .collect()
}

fn label(record: &Record, x: &str) -> Option<CellValue> {
    record.get(x).cloned()
}

fn treemap_size(value: f64) -> f64 {
    let size = value.abs();
    if size == 0.0 {
        1.0
    } else {
        size
    }
}

fn percentage(value: f64, max_value: f64) -> f64 {
    if max_value == 0.0 {
        0.0
    } else {
        value / max_value * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::palette::EXTENDED_PALETTE;
    use crate::chart::palette::PALETTE;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let records = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row.iter())
                    .map(|(column, value)| (*column, CellValue::from_text(*value)))
                    .collect::<Record>()
            })
            .collect();
        Table::new(columns.iter().map(|column| column.to_string()).collect(), records)
    }

    fn text(value: &str) -> Option<CellValue> {
        Some(CellValue::from_text(value))
    }

    fn sales() -> Table {
        table(&["month", "sales"], &[&["Jan", "10"], &["Feb", "bad"]])
    }

    #[test]
    fn bar_uses_base_transform() {
        let dataset = transform(&sales(), &ChartRequest::new(ChartKind::Bar, "month", "sales"));
        assert_eq!(
            dataset,
            ChartDataset::Series(vec![
                ChartPoint { label: text("Jan"), value: 10.0 },
                ChartPoint { label: text("Feb"), value: 0.0 },
            ])
        );
    }

    #[test]
    fn base_kinds_share_shape() {
        let table = sales();
        let expected = transform(&table, &ChartRequest::new(ChartKind::Bar, "month", "sales"));
        for kind in [ChartKind::Line, ChartKind::Scatter, ChartKind::Area, ChartKind::Composed] {
            assert_eq!(transform(&table, &ChartRequest::new(kind, "month", "sales")), expected);
        }
    }

    #[test]
    fn unknown_fields_are_not_errors() {
        let dataset = transform(&sales(), &ChartRequest::new(ChartKind::Bar, "nope", "missing"));
        assert_eq!(
            dataset,
            ChartDataset::Series(vec![
                ChartPoint { label: None, value: 0.0 },
                ChartPoint { label: None, value: 0.0 },
            ])
        );
    }

    #[test]
    fn colored_kinds_cycle_palette() {
        let rows: Vec<Vec<String>> = (0..20).map(|index| vec![format!("c{index}"), "5".to_owned()]).collect();
        let rows: Vec<Vec<&str>> = rows.iter().map(|row| row.iter().map(String::as_str).collect()).collect();
        let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        let table = table(&["name", "value"], &rows);

        for kind in [ChartKind::Pie, ChartKind::Donut, ChartKind::Funnel] {
            let ChartDataset::Colored(points) = transform(&table, &ChartRequest::new(kind, "name", "value")) else {
                panic!("{kind} should produce colored points");
            };
            assert_eq!(points.len(), 20);
            for (index, point) in points.iter().enumerate() {
                assert_eq!(point.color, PALETTE[index % 8]);
            }
        }
    }

    #[test]
    fn radar_detects_first_three_numeric_columns() {
        let table = table(
            &["name", "a", "note", "b", "c", "d"],
            &[
                &["r0", "1", "x", "2", "3", "4"],
                &["r1", "5", "y", "oops", "7", "8"],
                &["r2", "1", "z", "1", "1", "1"],
                &["r3", "1", "z", "1", "1", "1"],
                &["r4", "1", "z", "1", "1", "1"],
                &["r5", "1", "z", "1", "1", "1"],
            ],
        );
        let ChartDataset::Radar(radar) = transform(&table, &ChartRequest::new(ChartKind::Radar, "name", "a")) else {
            panic!("radar should produce a radar dataset");
        };
        assert_eq!(radar.series, ["a", "b", "c"]);
        assert_eq!(radar.entries.len(), RADAR_ROW_LIMIT);
        assert_eq!(radar.entries[1].label, text("r1"));
        assert_eq!(
            radar.entries[1].values,
            vec![("a".to_owned(), 5.0), ("b".to_owned(), 0.0), ("c".to_owned(), 7.0)]
        );
    }

    #[test]
    fn radar_serializes_flat() {
        let table = table(&["name", "score"], &[&["Ann", "9"]]);
        let dataset = transform(&table, &ChartRequest::new(ChartKind::Radar, "name", "score"));
        assert_eq!(
            serde_json::to_string(&dataset).unwrap(),
            r#"{"series":["score"],"entries":[{"label":"Ann","score":9.0}]}"#
        );
    }

    #[test]
    fn radar_skips_column_named_label() {
        let table = table(&["name", "label", "score"], &[&["A", "5", "7"]]);
        let dataset = transform(&table, &ChartRequest::new(ChartKind::Radar, "name", "score"));
        let ChartDataset::Radar(radar) = &dataset else {
            panic!("radar should produce a radar dataset");
        };
        assert_eq!(radar.series, ["score"]);
        assert_eq!(
            serde_json::to_string(&dataset).unwrap(),
            r#"{"series":["score"],"entries":[{"label":"A","score":7.0}]}"#
        );
    }

    #[test]
    fn radar_of_empty_table() {
        let table = table(&["name", "score"], &[]);
        let dataset = radar_dataset(&table, "name");
        assert!(dataset.series.is_empty());
        assert!(dataset.entries.is_empty());
    }

    #[test]
    fn treemap_sizes_are_positive() {
        let table = table(&["k", "v"], &[&["a", "0"], &["b", "-4"], &["c", "junk"], &["d", "2.5"]]);
        let ChartDataset::Treemap(nodes) = transform(&table, &ChartRequest::new(ChartKind::Treemap, "k", "v")) else {
            panic!("treemap should produce nodes");
        };
        let sizes: Vec<f64> = nodes.iter().map(|node| node.size).collect();
        assert_eq!(sizes, [1.0, 4.0, 1.0, 2.5]);
        assert_eq!(nodes[3].color, EXTENDED_PALETTE[3]);
    }

    #[test]
    fn radial_bar_percentages() {
        let table = table(
            &["k", "v"],
            &[&["a", "10"], &["b", "5"], &["c", "1"], &["d", "1"], &["e", "1"], &["f", "1"], &["g", "20"]],
        );
        let ChartDataset::RadialBar(entries) = transform(&table, &ChartRequest::new(ChartKind::RadialBar, "k", "v")) else {
            panic!("radial bar should produce entries");
        };
        // The maximum comes from a row that is not shown
        assert_eq!(entries.len(), RADIAL_BAR_ROW_LIMIT);
        assert_eq!(entries[0].percentage, 50.0);
        assert_eq!(entries[1].percentage, 25.0);
        assert_eq!(entries[5].color, EXTENDED_PALETTE[5]);
    }

    #[test]
    fn radial_bar_zero_maximum() {
        let table = table(&["k", "v"], &[&["a", "0"], &["b", "none"]]);
        let entries = radial_bar_entries(&table, "k", "v");
        assert!(entries.iter().all(|entry| entry.percentage == 0.0));
    }

    #[test]
    fn transform_is_deterministic() {
        let table = sales();
        for kind in ChartKind::ALL {
            let request = ChartRequest::new(kind, "month", "sales");
            let first = serde_json::to_string(&transform(&table, &request)).unwrap();
            let second = serde_json::to_string(&transform(&table, &request)).unwrap();
            assert_eq!(first, second);
        }
    }
}
