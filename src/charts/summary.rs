//! Summary counters shown beside the charts

use serde::Serialize;

use crate::aggregate::{state_total, total};
use crate::dataset::{Dataset, MetricName};

use super::format::format_thousands;

/// A raw integer with its display rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub label: String,
    pub value: i64,
    pub formatted: String,
}

impl Counter {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
            formatted: format_thousands(value),
        }
    }
}

/// The four headline counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_cases: Counter,
    pub total_deaths: Counter,
    pub usa_cases: Counter,
    pub usa_deaths: Counter,
}

impl Summary {
    /// Global counters sum every row of the case table, aggregate rows
    /// included. US counters sum the state summary before the code join.
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            total_cases: Counter::new(
                "Total Cases",
                total(&dataset.cases, MetricName::NewCases),
            ),
            total_deaths: Counter::new(
                "Total Deaths",
                total(&dataset.cases, MetricName::NewDeaths),
            ),
            usa_cases: Counter::new(
                "Total US Cases",
                state_total(&dataset.states, MetricName::TotalCases),
            ),
            usa_deaths: Counter::new(
                "Total US Deaths",
                state_total(&dataset.states, MetricName::TotalDeaths),
            ),
        }
    }

    /// Counters in display order
    pub fn counters(&self) -> [&Counter; 4] {
        [
            &self.total_cases,
            &self.total_deaths,
            &self.usa_cases,
            &self.usa_deaths,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CaseRecord, RegionTable, StateCodeLookup, StateRecord, StateTable};
    use chrono::NaiveDate;

    #[test]
    fn test_summary_counters() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let dataset = Dataset::new(
            RegionTable::from_records(vec![
                CaseRecord::new(date, "USA", "United States")
                    .new_cases(1_000_000)
                    .new_deaths(2_500),
                CaseRecord::new(date, "IND", "India").new_cases(234_567),
            ]),
            StateTable::from_records(vec![
                StateRecord::new("Texas", 3_000_000, 40_000),
                StateRecord::new("Foo", 1, 1),
            ]),
            StateCodeLookup::from_pairs([("Texas", "TX")]),
        );

        let summary = Summary::compute(&dataset);

        assert_eq!(summary.total_cases.value, 1_234_567);
        assert_eq!(summary.total_cases.formatted, "1,234,567");
        assert_eq!(summary.total_deaths.formatted, "2,500");
        assert_eq!(summary.usa_cases.formatted, "3,000,001");
        assert_eq!(summary.usa_deaths.value, 40_001);

        let labels: Vec<_> = summary.counters().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Total Cases", "Total Deaths", "Total US Cases", "Total US Deaths"]
        );
    }
}
