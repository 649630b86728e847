//! Aggregator
//!
//! Pure grouped sums over the read-only dataset tables:
//!
//! - **group**: per-region sums over the global time series
//! - **join**: per-state sums keyed by postal code
//! - **result**: the `AggregationResult` mapping both produce
//!
//! Every function here borrows its tables immutably and allocates a fresh
//! result, so concurrent sessions can call them against the same `Arc`'d
//! dataset without coordination.

mod group;
mod join;
mod result;

pub use group::{aggregate, aggregate_countries, total};
pub use join::{join_state_codes, state_total};
pub use result::AggregationResult;
