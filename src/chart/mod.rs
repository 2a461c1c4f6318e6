//! # Chart Data Transformation
//!
//! Chart kinds, their color palettes, the kind recommendation heuristic and the
//! transformation of an ingested [`Table`](crate::table::Table) into the data
//! shape each chart kind is drawn from.
use thiserror::Error;

mod kind;
pub mod palette;
mod recommend;
mod transform;

pub use kind::ChartKind;
pub use recommend::recommend_chart_kind;
pub use transform::transform;
pub use transform::ChartDataset;
pub use transform::ChartPoint;
pub use transform::ChartRequest;
pub use transform::ColoredPoint;
pub use transform::RadarDataset;
pub use transform::RadarEntry;
pub use transform::RadialBarEntry;
pub use transform::TreemapNode;
pub use transform::RADAR_LABEL_KEY;
pub use transform::RADAR_ROW_LIMIT;
pub use transform::RADAR_SERIES_LIMIT;
pub use transform::RADIAL_BAR_ROW_LIMIT;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Unknown chart kind '{0}'")]
    UnknownChartKind(String),
}
