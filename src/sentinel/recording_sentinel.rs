// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! This module contains an implementation of Sentinel that simply records
//! all calls in a human readable form. This is mostly useful for tests.

use crate::{hailstone::StepCount, sentinel::StepSentinel};

/// A sentinel that records all calls.
#[derive(Debug, Default)]
pub struct RecordingSentinel {
    /// A string-representation of each call that the sentinel has received.
    pub events_seen: Vec<String>,
}

impl RecordingSentinel {
    /// Create a new RecordingSentinel
    pub fn new() -> RecordingSentinel {
        RecordingSentinel {
            events_seen: vec![],
        }
    }

    /// The values reported through [`StepSentinel::visit`], in order.
    pub fn visited(&self) -> Vec<u64> {
        self.events_seen
            .iter()
            .filter_map(|event| event.strip_prefix("visit "))
            .filter_map(|value| value.parse().ok())
            .collect()
    }
}

impl StepSentinel for RecordingSentinel {
    fn visit(&mut self, value: u64) {
        self.events_seen.push(format!("visit {value}"));
    }

    fn hit(&mut self, value: u64, steps: StepCount) {
        self.events_seen.push(format!("hit {value} => {steps}"));
    }

    fn miss(&mut self, value: u64) {
        self.events_seen.push(format!("miss {value}"));
    }
}
