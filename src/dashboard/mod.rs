//! Covidash Dashboard
//!
//! Binds the three dashboard controls to chart recomputation:
//!
//! - **defaults**: named default selections and selection normalization
//! - **render**: per-panel aggregate-then-build pipelines
//! - **controller**: the per-session reactive controller
//!
//! # Example
//!
//! ```rust,no_run
//! use covidash::dashboard::{DashboardController, DashboardDefaults, InputEvent};
//! use covidash::dataset::{Dataset, DatasetPaths};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Arc::new(Dataset::load(&DatasetPaths {
//!     covid_csv: "owid-covid-data.csv".into(),
//!     usa_csv: "USA Covid Data.csv".into(),
//!     state_codes_csv: "csvData.csv".into(),
//! })?);
//!
//! let mut session = DashboardController::new(dataset, Arc::new(DashboardDefaults::default()));
//! let update = session.handle(InputEvent::PieRegions(Some(vec!["USA".into(), "IND".into()])));
//! println!("{:?} is now at revision {}", update.chart, update.revision);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod defaults;
pub mod render;

pub use controller::{
    ChartId, ChartSlot, ChartUpdate, ChartView, DashboardCharts, DashboardController,
    DashboardView, DropdownOptions, InputEvent, Phase, SelectionState,
};
pub use defaults::{
    normalize_region, normalize_regions, DashboardDefaults, DEFAULT_LINE_REGION,
    DEFAULT_REGION_FILTER, INITIAL_BAR_REGIONS, INITIAL_PIE_REGIONS,
};
