use crate::chart::ChartError;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// Enumeration of supported chart kinds.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
    Area,
    Donut,
    Radar,
    Funnel,
    Treemap,
    Composed,
    RadialBar,
}

impl ChartKind {
    /// All kinds in catalog order.
    pub const ALL: [ChartKind; 11] = [
        Self::Bar,
        Self::Line,
        Self::Pie,
        Self::Scatter,
        Self::Area,
        Self::Donut,
        Self::Radar,
        Self::Funnel,
        Self::Treemap,
        Self::Composed,
        Self::RadialBar,
    ];

    /// Returns the wire name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Area => "area",
            Self::Donut => "donut",
            Self::Radar => "radar",
            Self::Funnel => "funnel",
            Self::Treemap => "treemap",
            Self::Composed => "composed",
            Self::RadialBar => "radialBar",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Bar => "Bar Chart",
            Self::Line => "Line Chart",
            Self::Pie => "Pie Chart",
            Self::Scatter => "Scatter Plot",
            Self::Area => "Area Chart",
            Self::Donut => "Donut Chart",
            Self::Radar => "Radar Chart",
            Self::Funnel => "Funnel Chart",
            Self::Treemap => "Treemap",
            Self::Composed => "Composed Chart",
            Self::RadialBar => "Radial Bar",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Bar => "Compare values across categories",
            Self::Line => "Show trends over time",
            Self::Pie => "Show proportions of a whole",
            Self::Scatter => "Explore relationships between variables",
            Self::Area => "Show trends with filled areas",
            Self::Donut => "Pie chart with center space for additional info",
            Self::Radar => "Compare multiple variables in a circular format",
            Self::Funnel => "Show progressive reduction of data",
            Self::Treemap => "Display hierarchical data as nested rectangles",
            Self::Composed => "Combine multiple chart types in one view",
            Self::RadialBar => "Circular bar chart for progress or comparison",
        }
    }

    /// Parses a kind from its wire name (case-insensitive).
    ///
    /// # Arguments
    ///
    /// * `name` - Wire name such as `bar` or `radialBar`
    ///
    /// # Returns
    ///
    /// * `Result<Self, ChartError>` - The parsed kind or error
    pub fn parse(name: &str) -> Result<Self, ChartError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChartError::UnknownChartKind(name.to_owned()))
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
