//! Aggregation result type

use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::{MetricName, RegionCode};

/// Summed metric per region code
///
/// Keys iterate in ascending code order, so two results built from the same
/// inputs always iterate identically. Built fresh on each query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    metric: MetricName,
    values: BTreeMap<RegionCode, i64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: BTreeMap<RegionCode, String>,
}

impl AggregationResult {
    /// Create an empty result for a metric
    pub fn new(metric: MetricName) -> Self {
        Self {
            metric,
            values: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Add `value` to the running sum for `code`
    pub(crate) fn accumulate(&mut self, code: &str, value: i64) {
        let sum = self.values.entry(code.to_string()).or_insert(0);
        *sum = sum.saturating_add(value);
    }

    /// Attach a display label to `code`
    pub(crate) fn set_label(&mut self, code: &str, label: impl Into<String>) {
        self.labels.insert(code.to_string(), label.into());
    }

    pub fn metric(&self) -> MetricName {
        self.metric
    }

    pub fn get(&self, code: &str) -> Option<i64> {
        self.values.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (code, sum) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.values.iter().map(|(code, value)| (code.as_str(), *value))
    }

    /// Codes in key order
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Display label for a code, falling back to the code itself
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.labels.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Sum across every key
    pub fn total(&self) -> i64 {
        self.values.values().fold(0, |acc, v| acc.saturating_add(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_iterate_in_code_order() {
        let mut result = AggregationResult::new(MetricName::NewCases);
        result.accumulate("USA", 100);
        result.accumulate("IND", 50);
        result.accumulate("USA", 200);

        let pairs: Vec<_> = result.iter().collect();
        assert_eq!(pairs, vec![("IND", 50), ("USA", 300)]);
        assert_eq!(result.total(), 350);
        assert_eq!(result.metric(), MetricName::NewCases);
    }

    #[test]
    fn test_sums_saturate_at_limits() {
        let mut result = AggregationResult::new(MetricName::NewCases);
        result.accumulate("USA", i64::MAX - 1);
        result.accumulate("USA", 10);
        result.accumulate("IND", i64::MAX);
        result.accumulate("MEX", i64::MIN);
        result.accumulate("MEX", -1);

        assert_eq!(result.get("USA"), Some(i64::MAX));
        assert_eq!(result.get("MEX"), Some(i64::MIN));
        // IND + MEX = -1, then + USA
        assert_eq!(result.total(), i64::MAX - 1);
    }

    #[test]
    fn test_label_falls_back_to_code() {
        let mut result = AggregationResult::new(MetricName::TotalCases);
        result.accumulate("TX", 5);
        result.accumulate("OH", 3);
        result.set_label("TX", "Texas");

        assert_eq!(result.label("TX"), "Texas");
        assert_eq!(result.label("OH"), "OH");
    }
}
