//! Default selections and selection normalization
//!
//! Two kinds of default exist per control. The *initial* selection is what a
//! fresh session renders first. The *fallback* selection replaces an empty or
//! absent selection on every later input event.

use serde::Deserialize;

use crate::dataset::RegionFilter;

/// Fallback region set for the bar and pie charts when nothing is selected
pub const DEFAULT_REGION_FILTER: &[&str] = &["USA"];

/// Region shown by the line chart on first render and when nothing is selected
pub const DEFAULT_LINE_REGION: &str = "United States";

/// Initial bar chart selection
pub const INITIAL_BAR_REGIONS: &[&str] = &[
    "USA", "IND", "MEX", "GBR", "ITA", "JPN", "CAN", "AUS", "RUS", "FRA", "DNK", "DEU", "ISR",
    "BRA", "ARG", "ESP", "UKR",
];

/// Initial pie chart selection
pub const INITIAL_PIE_REGIONS: &[&str] = &["USA", "IND", "MEX"];

/// Configurable defaults for the three dashboard controls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardDefaults {
    #[serde(default = "default_line_region")]
    pub line_region: String,

    #[serde(default = "default_bar_regions")]
    pub bar_regions: Vec<String>,

    #[serde(default = "default_pie_regions")]
    pub pie_regions: Vec<String>,

    #[serde(default = "default_fallback_regions")]
    pub fallback_regions: Vec<String>,
}

fn default_line_region() -> String {
    DEFAULT_LINE_REGION.to_string()
}

fn default_bar_regions() -> Vec<String> {
    to_strings(INITIAL_BAR_REGIONS)
}

fn default_pie_regions() -> Vec<String> {
    to_strings(INITIAL_PIE_REGIONS)
}

fn default_fallback_regions() -> Vec<String> {
    to_strings(DEFAULT_REGION_FILTER)
}

fn to_strings(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

impl Default for DashboardDefaults {
    fn default() -> Self {
        Self {
            line_region: default_line_region(),
            bar_regions: default_bar_regions(),
            pie_regions: default_pie_regions(),
            fallback_regions: default_fallback_regions(),
        }
    }
}

impl DashboardDefaults {
    /// Filter substituted for an empty bar or pie selection
    pub fn fallback_filter(&self) -> RegionFilter {
        self.fallback_regions.iter().cloned().collect()
    }

    pub fn initial_bar_filter(&self) -> RegionFilter {
        normalize_regions(Some(self.bar_regions.clone()), &self.fallback_filter())
    }

    pub fn initial_pie_filter(&self) -> RegionFilter {
        normalize_regions(Some(self.pie_regions.clone()), &self.fallback_filter())
    }
}

/// Normalize a multi-select value into a filter set.
///
/// Blank entries are discarded. A selection that is absent, or empty once
/// blanks are gone, becomes `fallback`.
pub fn normalize_regions(selection: Option<Vec<String>>, fallback: &RegionFilter) -> RegionFilter {
    let filter: RegionFilter = selection
        .unwrap_or_default()
        .into_iter()
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();

    if filter.is_empty() {
        fallback.clone()
    } else {
        filter
    }
}

/// Normalize a single-select value, substituting `fallback` when blank or absent
pub fn normalize_region(selection: Option<String>, fallback: &str) -> String {
    match selection.as_deref().map(str::trim) {
        Some(region) if !region.is_empty() => region.to_string(),
        _ => fallback.to_string(),
    }
}
