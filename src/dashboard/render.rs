//! Dataset-to-chart pipelines for each dashboard panel
//!
//! Each function runs the aggregation a panel needs and hands the result to
//! its builder. They hold no state and are shared by the per-session
//! controller and the stateless HTTP chart endpoints.

use crate::aggregate::{aggregate, aggregate_countries, join_state_codes};
use crate::charts::{build_bar, build_choropleth, build_line, build_pie, ChartSpec, MapScope};
use crate::dataset::{Dataset, MetricName, RegionFilter};

/// Metric compared across regions by the bar and pie charts
pub const COMPARISON_METRIC: MetricName = MetricName::NewCases;

/// Metric shading the world map
pub const WORLD_MAP_METRIC: MetricName = MetricName::NewCases;

/// Metric shading the US map
pub const USA_MAP_METRIC: MetricName = MetricName::TotalCases;

pub fn line_chart(dataset: &Dataset, region_name: &str) -> ChartSpec {
    build_line(&dataset.cases, region_name)
}

pub fn bar_chart(dataset: &Dataset, filter: &RegionFilter) -> ChartSpec {
    build_bar(&aggregate(&dataset.cases, filter, COMPARISON_METRIC))
}

pub fn pie_chart(dataset: &Dataset, filter: &RegionFilter) -> ChartSpec {
    build_pie(&aggregate(&dataset.cases, filter, COMPARISON_METRIC))
}

pub fn world_map(dataset: &Dataset) -> ChartSpec {
    build_choropleth(
        &aggregate_countries(&dataset.cases, WORLD_MAP_METRIC),
        MapScope::Global,
    )
}

pub fn usa_map(dataset: &Dataset) -> ChartSpec {
    build_choropleth(
        &join_state_codes(&dataset.states, &dataset.state_codes, USA_MAP_METRIC),
        MapScope::Usa,
    )
}
