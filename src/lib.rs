//! # Covidash
//!
//! COVID-19 dashboard backend: loads the case, death and per-state datasets
//! once at startup and serves declarative chart specifications that a
//! browser client renders with Plotly.
//!
//! ## Features
//!
//! - **Static datasets**: three CSV tables loaded once, shared read-only
//! - **Pure aggregation**: grouped sums over region codes and state codes
//! - **Chart specs**: line, bar, pie and choropleth specs as plain data
//! - **Reactive sessions**: one controller per WebSocket session; each input
//!   recomputes exactly one chart
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading and in-memory tables
//! - [`aggregate`]: Grouped sums and the state code join
//! - [`charts`]: Chart builders, counters and number formatting
//! - [`dashboard`]: Default selections and the reactive controller
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Interactive dashboard sessions
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covidash::config::Config;
//! use covidash::dashboard::{DashboardController, InputEvent};
//! use covidash::dataset::Dataset;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let dataset = Arc::new(Dataset::load(&config.data.paths())?);
//!
//!     let mut session = DashboardController::new(dataset, Arc::new(config.dashboard));
//!     let update = session.handle(InputEvent::BarRegions(Some(vec!["GBR".into()])));
//!
//!     println!("bar chart now has {} bars", update.spec.point_count());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{
    CaseRecord, Dataset, DatasetError, DatasetPaths, DatasetResult, MetricName, RegionFilter,
    RegionTable, StateCodeLookup, StateRecord, StateTable,
};

pub use aggregate::AggregationResult;

pub use charts::{ChartSpec, Summary};

pub use dashboard::{DashboardController, DashboardDefaults, DashboardView, InputEvent};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, HubConfig, HubError, ServerMessage, SessionHub};

pub use config::{Config, ConfigError, DataConfig, LoggingConfig};
