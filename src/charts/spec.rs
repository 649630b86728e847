//! Declarative chart specifications
//!
//! A `ChartSpec` is everything a plotting front end needs to draw one chart:
//! kind, title, ordered series, color mapping and layout. Specs are plain
//! data, serialized to JSON for the browser and never mutated after a
//! builder returns them.

use serde::Serialize;

/// Theme applied to every chart
pub const TEMPLATE: &str = "plotly_dark";

/// Default qualitative palette for per-category colors
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// A complete chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<Series>,
    pub colors: ColorMapping,
    pub layout: Layout,
}

impl ChartSpec {
    /// Total number of points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Find a series by label
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }
}

/// Chart type with its type-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie {
        /// Fraction of the radius cut out of the center
        hole: f64,
    },
    Choropleth {
        scope: MapScope,
        location_mode: String,
    },
}

/// Geographic extent of a choropleth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapScope {
    /// Countries keyed by ISO-3166 alpha-3
    Global,
    /// US states keyed by two-letter postal code
    Usa,
}

impl MapScope {
    /// Locator scheme for the region codes
    pub fn location_mode(&self) -> &'static str {
        match self {
            MapScope::Global => "ISO-3",
            MapScope::Usa => "USA-states",
        }
    }
}

/// One named sequence of points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// x values in order
    pub fn xs(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|p| p.x.as_str())
    }

    /// Sum of the non-blank y values
    pub fn sum(&self) -> i64 {
        self.points.iter().filter_map(|p| p.y).fold(0, i64::saturating_add)
    }
}

/// A single data point; `y` is `None` for a gap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: String,
    pub y: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

impl Point {
    pub fn new(x: impl Into<String>, y: Option<i64>) -> Self {
        Self {
            x: x.into(),
            y,
            hover: None,
        }
    }

    pub fn hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }
}

/// How values or categories map to colors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMapping {
    /// Fixed color per series label or category
    Discrete { colors: Vec<SeriesColor> },
    /// Continuous scale over the point values
    Continuous { scale: ColorScale },
}

/// Color assigned to one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub label: String,
    pub color: String,
}

impl SeriesColor {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Named continuous color scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    Plasma,
    Jet,
}

/// Layout options shared by every chart kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            template: TEMPLATE.to_string(),
            x_axis_title: None,
            y_axis_title: None,
            margin: None,
        }
    }
}

/// Plot margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}

impl Margin {
    pub const ZERO: Margin = Margin {
        r: 0,
        t: 0,
        l: 0,
        b: 0,
    };
}
