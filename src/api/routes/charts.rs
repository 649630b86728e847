//! Chart Routes
//!
//! Stateless chart rendering. Each request normalizes its own selection
//! exactly as a dashboard session would, so an absent or empty selection
//! renders the default chart.
//!
//! - GET /api/v1/charts/line?region=India
//! - GET /api/v1/charts/bar?regions=USA,IND
//! - GET /api/v1/charts/pie?regions=USA,IND
//! - GET /api/v1/charts/map/world
//! - GET /api/v1/charts/map/usa

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartResponse, LineQuery, RegionsQuery};
use crate::api::state::AppState;
use crate::charts::ChartSpec;
use crate::dashboard::{normalize_region, normalize_regions, render, ChartId};

/// GET /api/v1/charts/line
pub async fn line(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LineQuery>,
) -> Json<ChartResponse> {
    let region = normalize_region(query.region, &state.defaults.line_region);
    respond(ChartId::Line, render::line_chart(&state.dataset, &region))
}

/// GET /api/v1/charts/bar
pub async fn bar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegionsQuery>,
) -> Json<ChartResponse> {
    let filter = normalize_regions(query.selection(), &state.defaults.fallback_filter());
    respond(ChartId::Bar, render::bar_chart(&state.dataset, &filter))
}

/// GET /api/v1/charts/pie
pub async fn pie(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegionsQuery>,
) -> Json<ChartResponse> {
    let filter = normalize_regions(query.selection(), &state.defaults.fallback_filter());
    respond(ChartId::Pie, render::pie_chart(&state.dataset, &filter))
}

/// GET /api/v1/charts/map/world
pub async fn world_map(State(state): State<Arc<AppState>>) -> Json<ChartResponse> {
    respond(ChartId::WorldMap, render::world_map(&state.dataset))
}

/// GET /api/v1/charts/map/usa
pub async fn usa_map(State(state): State<Arc<AppState>>) -> Json<ChartResponse> {
    respond(ChartId::UsaMap, render::usa_map(&state.dataset))
}

fn respond(chart: ChartId, spec: ChartSpec) -> Json<ChartResponse> {
    tracing::debug!(chart = ?chart, points = spec.point_count(), "Chart rendered");
    Json(ChartResponse { chart, spec })
}
