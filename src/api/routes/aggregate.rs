//! Aggregate Route
//!
//! - POST /api/v1/aggregate - Grouped sum of one metric over region codes
//!
//! Unlike the chart endpoints this runs the raw aggregator: an empty region
//! list is not replaced by the default selection and yields an empty result.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::aggregate::aggregate;
use crate::api::dto::{AggregateRequest, AggregateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::MetricName;

/// POST /api/v1/aggregate
pub async fn aggregate_regions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AggregateRequest>,
) -> ApiResult<Json<AggregateResponse>> {
    let metric = match req.metric.as_deref() {
        Some(name) => name.parse::<MetricName>().map_err(ApiError::Validation)?,
        None => MetricName::NewCases,
    };

    let result = aggregate(&state.dataset.cases, &req.filter(), metric);

    tracing::debug!(
        metric = %metric,
        requested = req.regions.len(),
        matched = result.len(),
        "Aggregated"
    );

    Ok(Json(AggregateResponse::from(&result)))
}
