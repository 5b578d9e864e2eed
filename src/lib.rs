// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! # hailmerge: Hailstone Step Counting and Interval Set Merging
//!
//! This crate bundles two small, independent numeric building blocks:
//!
//! - the [`hailstone`] module counts how many steps the hailstone (Collatz) iteration takes
//!   to reach 1, either naively or through a memoizing [`StepCounter`];
//! - the [`interval`] module merges two ordered sets of closed integer intervals into one
//!   ordered [`IntervalSet`].
//!
//! No data flows between the two. They share this crate, its error conventions and its
//! ambient stack (hashing, logging, serialization, test tooling) only.
//!
//! ## Hailstone Steps
//!
//! The hailstone sequence of `n` is produced by repeatedly halving `n` if it is even, or
//! tripling it and adding one if it is odd, until the value reaches 1. The *step count* is the
//! number of transitions taken.
//!
//! ```rust
//! use hailmerge::hailstone::{self, StepCounter};
//!
//! // 6 -> 3 -> 10 -> 5 -> 16 -> 8 -> 4 -> 2 -> 1
//! assert_eq!(hailstone::steps(6).unwrap(), 8);
//!
//! // The memoizing counter agrees with the naive one, but every value it walks through is
//! // cached, so later calls that run into the same tail stop early.
//! let mut counter = StepCounter::new();
//! assert_eq!(counter.opt_steps(6).unwrap(), 8);
//! assert_eq!(counter.opt_steps(3).unwrap(), 7); // answered from the cache
//! assert_eq!(counter.max_steps([1, 2, 3, 4, 5, 6]).unwrap(), 8);
//! ```
//!
//! The cache is an explicit object owned by a [`StepCounter`] rather than global state. The
//! free functions [`hailstone::opt_steps`] and [`hailstone::max_steps`] use a per-thread
//! default counter for callers that want process-lifetime memoization without carrying a
//! counter around. For sharing one cache between threads see
//! [`SharedStepCache`](hailstone::SharedStepCache).
//!
//! ## Interval Sets
//!
//! An [`Interval`] is a closed range `low..=high`. An [`IntervalSet`] is a sequence of
//! intervals in ascending order where every interval ends strictly before the next one
//! starts.
//!
//! ```rust
//! use hailmerge::{IntervalSet, interval};
//!
//! let left = IntervalSet::from_intervals([(1, 3), (40, 70), (100, 200)]).unwrap();
//! let right = IntervalSet::from_intervals([(5, 15), (21, 31), (83, 92)]).unwrap();
//!
//! let merged = interval::merge(&left, &right);
//! assert_eq!(
//!     merged,
//!     IntervalSet::from_intervals([(1, 3), (5, 15), (21, 31), (40, 70), (83, 92), (100, 200)])
//!         .unwrap()
//! );
//! ```
//!
//! [`interval::merge`] is a single two-cursor sweep. When an interval from one side is merged
//! with one from the other, the combined interval is not compared again against what comes
//! next, so chains of three or more overlapping intervals can be left partially merged.
//! [`interval::union`] runs the same sweep and then normalizes the output, which always yields
//! a fully merged set:
//!
//! ```rust
//! use hailmerge::{IntervalSet, interval};
//!
//! let left = IntervalSet::from_intervals([(1, 5), (7, 10)]).unwrap();
//! let right = IntervalSet::from_intervals([(4, 8)]).unwrap();
//!
//! // (1,5) and (4,8) combine into (1,8), which then overlaps (7,10)
//! assert!(!interval::merge(&left, &right).is_normalized());
//! assert_eq!(
//!     interval::union(&left, &right),
//!     IntervalSet::from_intervals([(1, 10)]).unwrap()
//! );
//! ```
//!
//! Two intervals are merged whenever they are not strictly disjoint: `(1,4)` and `(4,7)`
//! become `(1,7)`, but `(1,3)` and `(4,7)` stay separate even though no integer lies between
//! them.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (mostly at `debug` and `trace` level). Install any
//! subscriber to see them; the demos use `tracing-subscriber` with `RUST_LOG` filtering.
//!
//! ## License
//!
//! This project is licensed under either of
//!
//! - Apache License, Version 2.0, <http://www.apache.org/licenses/LICENSE-2.0>
//! - MIT license, <http://opensource.org/licenses/MIT>
//!
//! at your option.
//!
//! ## Features
//!
//! - `json`: Enables conversion of interval sets to and from `serde_json::Value`. This
//!   feature is enabled by default.
//! - `serde`: Provides `serde` support for [`Interval`] and [`IntervalSet`].
//! - `arbitrary`: Implements `quickcheck::Arbitrary` for interval types, useful for
//!   property-based testing.
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

use ahash::RandomState;
use std::{
    hash::BuildHasher,
    sync::atomic::{AtomicBool, Ordering},
};

// Use a constant seed for hashing to make performance benchmarks have less variance.
pub(crate) const DETERMINISTIC_HASHER: RandomState = RandomState::with_seeds(48, 1516, 23, 42);

pub mod hailstone;
pub use hailstone::{StepCache, StepCount, StepCounter, StepError};
pub mod interval;
pub use interval::{Interval, IntervalError, IntervalSet};
#[cfg(feature = "json")]
mod json;
/// Macros usable for tests and initialization
pub mod macros;
pub mod sentinel;

static ENABLE_DETERMINISM: AtomicBool = AtomicBool::new(false);

/// Makes all hash-based caches behave deterministically.
///
/// This should only be enabled for testing and benchmarking, as it increases the odds of DoS
/// scenarios.
#[doc(hidden)]
pub fn enable_determinism() {
    ENABLE_DETERMINISM.store(true, Ordering::Release);
}

/// Checks if determinism is enabled.
///
/// Should be used internally and for testing.
#[doc(hidden)]
pub fn determinism_enabled() -> bool {
    ENABLE_DETERMINISM.load(Ordering::Acquire)
}

/// Create a random state for a hashmap.
/// If `enable_determinism` has been used, this will return a deterministic
/// decidedly non-random RandomState, useful in tests.
#[inline]
fn make_random_state() -> RandomState {
    if determinism_enabled() {
        DETERMINISTIC_HASHER
    } else {
        RandomState::new()
    }
}

fn create_map<K, V>() -> std::collections::HashMap<K, V, HailRandomState> {
    std::collections::HashMap::with_hasher(HailRandomState::default())
}

fn create_map_with_capacity<K, V>(
    capacity: usize,
) -> std::collections::HashMap<K, V, HailRandomState> {
    std::collections::HashMap::with_capacity_and_hasher(capacity, HailRandomState::default())
}

/// This is a small wrapper around the ahash RandomState.
/// This allows us to easily switch to a non-random RandomState for use in benchmarks.
#[derive(Clone)]
pub struct HailRandomState {
    inner: RandomState,
}

// Falls back on a regular ahash::RandomState except when 'enable_determinism' has been
// called, in which case a static only-for-test RandomState is used.
impl Default for HailRandomState {
    #[inline]
    fn default() -> Self {
        Self {
            inner: make_random_state(),
        }
    }
}

impl BuildHasher for HailRandomState {
    type Hasher = <RandomState as BuildHasher>::Hasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        self.inner.build_hasher()
    }
}
