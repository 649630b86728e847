//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Full initial view (charts, counters, options)
//! - GET /api/v1/summary - The four headline counters
//! - GET /api/v1/options - Dropdown option lists

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::charts::Summary;
use crate::dashboard::{DashboardView, DropdownOptions};

/// GET /api/v1/dashboard
///
/// The page a new session renders first, built from a throwaway controller.
pub async fn initial_view(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.new_controller().view())
}

/// GET /api/v1/summary
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(Summary::compute(&state.dataset))
}

/// GET /api/v1/options
pub async fn options(State(state): State<Arc<AppState>>) -> Json<DropdownOptions> {
    Json(DropdownOptions::from_table(&state.dataset.cases))
}
