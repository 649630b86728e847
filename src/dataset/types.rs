//! Core data types for the COVID-19 datasets
//!
//! This module defines the in-memory tables the rest of the crate reads:
//! - `CaseRecord` / `RegionTable`: the global daily time series
//! - `StateRecord` / `StateTable`: the US per-state summary
//! - `StateCodeLookup`: state name to two-letter postal code
//! - `MetricName`: which numeric column an aggregation sums

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Short region identifier: ISO-3166 alpha-3 for countries, two letters for US states
pub type RegionCode = String;

/// A set of selected region codes
pub type RegionFilter = BTreeSet<RegionCode>;

/// One day of case/death figures for one region
///
/// Count columns are `None` when the source left the cell blank for that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub date: NaiveDate,
    pub region_code: RegionCode,
    pub region_name: String,
    pub total_cases: Option<i64>,
    pub new_cases: Option<i64>,
    pub total_deaths: Option<i64>,
    pub new_deaths: Option<i64>,
    pub continent: Option<String>,
}

impl CaseRecord {
    /// Create a record with every count blank
    pub fn new(date: NaiveDate, region_code: impl Into<String>, region_name: impl Into<String>) -> Self {
        Self {
            date,
            region_code: region_code.into(),
            region_name: region_name.into(),
            total_cases: None,
            new_cases: None,
            total_deaths: None,
            new_deaths: None,
            continent: None,
        }
    }

    /// Builder method: set new cases
    pub fn new_cases(mut self, value: i64) -> Self {
        self.new_cases = Some(value);
        self
    }

    /// Builder method: set new deaths
    pub fn new_deaths(mut self, value: i64) -> Self {
        self.new_deaths = Some(value);
        self
    }

    /// Builder method: set cumulative cases
    pub fn total_cases(mut self, value: i64) -> Self {
        self.total_cases = Some(value);
        self
    }

    /// Builder method: set cumulative deaths
    pub fn total_deaths(mut self, value: i64) -> Self {
        self.total_deaths = Some(value);
        self
    }

    /// Builder method: set continent
    pub fn continent(mut self, continent: impl Into<String>) -> Self {
        self.continent = Some(continent.into());
        self
    }

    /// Value of the given metric column for this day
    pub fn metric(&self, metric: MetricName) -> Option<i64> {
        match metric {
            MetricName::NewCases => self.new_cases,
            MetricName::NewDeaths => self.new_deaths,
            MetricName::TotalCases => self.total_cases,
            MetricName::TotalDeaths => self.total_deaths,
        }
    }

    /// Whether this row belongs to a real country rather than an aggregate
    /// pseudo-region (world, income groups, continents)
    pub fn is_country(&self) -> bool {
        self.continent.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Numeric column to aggregate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    NewCases,
    NewDeaths,
    TotalCases,
    TotalDeaths,
}

impl MetricName {
    /// Get all metrics for iteration
    pub fn all() -> &'static [MetricName] {
        &[
            MetricName::NewCases,
            MetricName::NewDeaths,
            MetricName::TotalCases,
            MetricName::TotalDeaths,
        ]
    }

    /// Source column name
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::NewCases => "new_cases",
            MetricName::NewDeaths => "new_deaths",
            MetricName::TotalCases => "total_cases",
            MetricName::TotalDeaths => "total_deaths",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new_cases" => Ok(MetricName::NewCases),
            "new_deaths" => Ok(MetricName::NewDeaths),
            "total_cases" => Ok(MetricName::TotalCases),
            "total_deaths" => Ok(MetricName::TotalDeaths),
            other => Err(format!(
                "Invalid metric: {}. Use new_cases, new_deaths, total_cases, or total_deaths",
                other
            )),
        }
    }
}

/// The global daily time series, immutable once loaded
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    records: Vec<CaseRecord>,
}

impl RegionTable {
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows for one region display name, in file order
    pub fn rows_for_name<'a>(&'a self, region_name: &'a str) -> impl Iterator<Item = &'a CaseRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.region_name == region_name)
    }

    /// Unique region display names in first-appearance order
    pub fn region_names(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|r| r.region_name.as_str()))
    }

    /// Unique region codes in first-appearance order
    pub fn region_codes(&self) -> Vec<RegionCode> {
        unique_in_order(self.records.iter().map(|r| r.region_code.as_str()))
    }

    /// First and last date present
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// One row of the US per-state summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state: String,
    pub total_cases: i64,
    pub total_deaths: i64,
}

impl StateRecord {
    pub fn new(state: impl Into<String>, total_cases: i64, total_deaths: i64) -> Self {
        Self {
            state: state.into(),
            total_cases,
            total_deaths,
        }
    }

    /// Value of a cumulative metric; the summary has no daily columns
    pub fn metric(&self, metric: MetricName) -> Option<i64> {
        match metric {
            MetricName::TotalCases => Some(self.total_cases),
            MetricName::TotalDeaths => Some(self.total_deaths),
            MetricName::NewCases | MetricName::NewDeaths => None,
        }
    }
}

/// The US per-state summary table
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    records: Vec<StateRecord>,
}

impl StateTable {
    pub fn from_records(records: Vec<StateRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// State name to two-letter postal code
#[derive(Debug, Clone, Default)]
pub struct StateCodeLookup {
    codes: HashMap<String, RegionCode>,
}

impl StateCodeLookup {
    /// Build from (state name, code) pairs; a later duplicate name wins
    pub fn from_pairs<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<String>,
    {
        Self {
            codes: pairs
                .into_iter()
                .map(|(s, c)| (s.into(), c.into()))
                .collect(),
        }
    }

    /// Exact-match lookup of a state's code
    pub fn code_for(&self, state: &str) -> Option<&str> {
        self.codes.get(state).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
