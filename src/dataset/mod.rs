//! Covidash Datasets
//!
//! The three static tables behind the dashboard:
//!
//! - **types**: In-memory tables (`RegionTable`, `StateTable`, `StateCodeLookup`)
//! - **loader**: CSV readers and the `Dataset` bundle loaded at startup
//! - **error**: Error types
//!
//! A `Dataset` is loaded exactly once and then shared read-only (behind an
//! `Arc`) by every handler and session. Nothing mutates it after load.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{
    load_cases, load_state_codes, load_states, read_cases, read_state_codes, read_states,
    Dataset, DatasetPaths, DatasetStats,
};
pub use types::{
    CaseRecord, MetricName, RegionCode, RegionFilter, RegionTable, StateCodeLookup, StateRecord,
    StateTable,
};
