//! Grouped sums over the global time series
//!
//! Blank cells contribute nothing to a sum, but a region with only blank
//! cells still appears in the result with a sum of zero.

use crate::dataset::{CaseRecord, MetricName, RegionFilter, RegionTable};

use super::result::AggregationResult;

/// Sum `metric` per region code over the full date range, restricted to
/// the codes in `filter`.
///
/// Codes in `filter` that never occur in `table` are absent from the result.
/// An empty filter yields an empty result; substituting a default selection
/// is the caller's job.
pub fn aggregate(table: &RegionTable, filter: &RegionFilter, metric: MetricName) -> AggregationResult {
    if filter.is_empty() {
        return AggregationResult::new(metric);
    }
    group_sum(
        table.records().iter().filter(|r| filter.contains(&r.region_code)),
        metric,
    )
}

/// Sum `metric` per region code for every real country.
///
/// Aggregate pseudo-regions (world, continents, income groups) carry no
/// continent and are skipped.
pub fn aggregate_countries(table: &RegionTable, metric: MetricName) -> AggregationResult {
    group_sum(table.records().iter().filter(|r| r.is_country()), metric)
}

/// Sum `metric` over every row of the table
pub fn total(table: &RegionTable, metric: MetricName) -> i64 {
    table
        .records()
        .iter()
        .filter_map(|r| r.metric(metric))
        .fold(0, i64::saturating_add)
}

fn group_sum<'a>(rows: impl Iterator<Item = &'a CaseRecord>, metric: MetricName) -> AggregationResult {
    let mut result = AggregationResult::new(metric);
    for row in rows {
        result.accumulate(&row.region_code, row.metric(metric).unwrap_or(0));
    }
    result
}
