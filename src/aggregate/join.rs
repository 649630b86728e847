//! US state summary joined to postal codes
//!
//! The join is an inner join on the exact state name: a state with no entry
//! in the lookup is dropped from the result without raising an error.
//! Whether those drops are intended is an open product question, so the
//! behavior is kept as-is and only logged.

use crate::dataset::{MetricName, StateCodeLookup, StateTable};

use super::result::AggregationResult;

/// Sum `metric` per state code, labelled with the state name
///
/// Only cumulative metrics exist in the state summary; a daily metric yields
/// an empty result.
pub fn join_state_codes(
    states: &StateTable,
    lookup: &StateCodeLookup,
    metric: MetricName,
) -> AggregationResult {
    let mut result = AggregationResult::new(metric);
    let mut dropped = 0usize;

    for record in states.records() {
        let Some(value) = record.metric(metric) else {
            continue;
        };
        match lookup.code_for(&record.state) {
            Some(code) => {
                result.accumulate(code, value);
                result.set_label(code, record.state.as_str());
            }
            None => {
                dropped += 1;
                tracing::debug!(state = %record.state, "No state code, row dropped from map");
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, joined = result.len(), "State code join dropped rows");
    }

    result
}

/// Sum of a cumulative metric over every state row, before the code join
pub fn state_total(states: &StateTable, metric: MetricName) -> i64 {
    states
        .records()
        .iter()
        .filter_map(|r| r.metric(metric))
        .fold(0, i64::saturating_add)
}
