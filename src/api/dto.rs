//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregationResult;
use crate::charts::ChartSpec;
use crate::dashboard::ChartId;
use crate::dataset::{DatasetStats, RegionFilter};

// ============================================
// CHART DTOs
// ============================================

/// Query string of the line chart endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LineQuery {
    /// Region display name, e.g. "India"
    #[serde(default)]
    pub region: Option<String>,
}

/// Query string of the bar and pie chart endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RegionsQuery {
    /// Comma-separated region codes, e.g. "USA,IND"
    #[serde(default)]
    pub regions: Option<String>,
}

impl RegionsQuery {
    /// Split the comma-separated list; `None` when the parameter is absent
    pub fn selection(&self) -> Option<Vec<String>> {
        self.regions
            .as_deref()
            .map(|list| list.split(',').map(|code| code.trim().to_string()).collect())
    }
}

/// A rendered chart
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub chart: ChartId,
    pub spec: ChartSpec,
}

// ============================================
// AGGREGATE DTOs
// ============================================

/// Aggregation request
#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    /// Region codes to sum; an empty list yields an empty result
    pub regions: Vec<String>,
    /// Metric column name, defaults to "new_cases"
    #[serde(default)]
    pub metric: Option<String>,
}

impl AggregateRequest {
    pub fn filter(&self) -> RegionFilter {
        self.regions
            .iter()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect()
    }
}

/// One region's sum
#[derive(Debug, Serialize)]
pub struct RegionValue {
    pub code: String,
    pub label: String,
    pub value: i64,
}

/// Aggregation response
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub metric: String,
    /// Ascending by region code
    pub values: Vec<RegionValue>,
    pub total: i64,
}

impl From<&AggregationResult> for AggregateResponse {
    fn from(result: &AggregationResult) -> Self {
        Self {
            metric: result.metric().to_string(),
            values: result
                .iter()
                .map(|(code, value)| RegionValue {
                    code: code.to_string(),
                    label: result.label(code).to_string(),
                    value,
                })
                .collect(),
            total: result.total(),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Loaded table sizes and date coverage
    pub dataset: DatasetStats,
    /// Live dashboard sessions
    pub sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
