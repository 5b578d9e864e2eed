// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! JSON representation
//!
//! An [`IntervalSet`] is represented as a JSON array of `[low, high]` pairs, mirroring the way
//! sets are printed:
//!
//! ```json
//! [[1, 3], [5, 15], [21, 31]]
//! ```
//!
//! This is deliberately more compact than the `serde` representation, which spells out
//! `{"low": 1, "high": 3}` for every interval.
use crate::interval::{Interval, IntervalError, IntervalSet};
use serde_json::Value;

/// Converts an [`Interval`] to a `[low, high]` [`serde_json::Value`].
impl From<Interval> for Value {
    fn from(ival: Interval) -> Self {
        Value::Array(vec![ival.low().into(), ival.high().into()])
    }
}

/// Converts an [`IntervalSet`] to a [`serde_json::Value`].
impl From<&IntervalSet> for Value {
    fn from(set: &IntervalSet) -> Self {
        Value::Array(set.iter().copied().map(Value::from).collect())
    }
}

impl From<IntervalSet> for Value {
    fn from(set: IntervalSet) -> Self {
        Value::from(&set)
    }
}

fn interval_from_json(value: &Value) -> Result<Interval, IntervalError> {
    match value.as_array().map(Vec::as_slice) {
        Some([low, high]) => {
            let low = low
                .as_i64()
                .ok_or(IntervalError("interval bounds must be integers"))?;
            let high = high
                .as_i64()
                .ok_or(IntervalError("interval bounds must be integers"))?;
            Interval::try_from((low, high))
        }
        _ => Err(IntervalError("expected a [low, high] pair")),
    }
}

impl IntervalSet {
    /// Parses a JSON array of `[low, high]` pairs, checking every invariant.
    pub fn from_json(value: &Value) -> Result<Self, IntervalError> {
        let pairs = value
            .as_array()
            .ok_or(IntervalError("expected an array of [low, high] pairs"))?;
        let ivals = pairs
            .iter()
            .map(interval_from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(ivals)
    }
}
