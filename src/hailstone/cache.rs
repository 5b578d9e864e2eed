// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Storage for memoized step counts.
//!
//! A [`StepCounter`](super::StepCounter) never talks to a concrete map directly; it goes
//! through the [`StepCache`] trait so that callers can pick the storage that suits them:
//!
//! - [`HashStepCache`] is the default: a single-owner hash map with an ahash hasher.
//! - [`SharedStepCache`] wraps a [`HashStepCache`] in an `Arc<Mutex<_>>`. Clones share their
//!   entries, so counters on different threads can feed each other.
//! - a plain [`BTreeMap`] works too, which is mostly useful in tests where ordered iteration
//!   over the cached values makes assertions easier to read.
//!
//! None of the caches ever evict. Entries are idempotent (a value always maps to the same step
//! count), which is what makes concurrent inserts of the same key harmless.

use super::StepCount;
use crate::{HailRandomState, create_map, create_map_with_capacity};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A mapping from a previously seen value to its hailstone step count.
pub trait StepCache {
    /// Returns the cached step count of `value`, if known.
    fn get(&self, value: u64) -> Option<StepCount>;

    /// Records the step count of `value`.
    fn insert(&mut self, value: u64, steps: StepCount);

    /// Number of cached values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every cached value.
    fn clear(&mut self);
}

/// The default [`StepCache`]: an unbounded hash map.
#[derive(Clone)]
pub struct HashStepCache {
    steps: HashMap<u64, StepCount, HailRandomState>,
}

impl HashStepCache {
    #[must_use]
    pub fn new() -> Self {
        Self { steps: create_map() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: create_map_with_capacity(capacity),
        }
    }
}

impl Default for HashStepCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashStepCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashStepCache")
            .field("len", &self.steps.len())
            .finish()
    }
}

impl StepCache for HashStepCache {
    #[inline]
    fn get(&self, value: u64) -> Option<StepCount> {
        self.steps.get(&value).copied()
    }

    #[inline]
    fn insert(&mut self, value: u64, steps: StepCount) {
        self.steps.insert(value, steps);
    }

    fn len(&self) -> usize {
        self.steps.len()
    }

    fn clear(&mut self) {
        self.steps.clear();
    }
}

/// A [`StepCache`] that can be shared between threads.
///
/// Every clone refers to the same underlying entries.
///
/// ```rust
/// use hailmerge::hailstone::{SharedStepCache, StepCounter};
/// use hailmerge::StepCache;
///
/// let cache = SharedStepCache::new();
/// let mut left = StepCounter::with_cache(cache.clone());
/// let mut right = StepCounter::with_cache(cache.clone());
///
/// assert_eq!(left.opt_steps(6).unwrap(), 8);
/// // 3 is on the trail of 6, so `right` finds it without computing anything
/// assert_eq!(cache.get(3), Some(7));
/// assert_eq!(right.opt_steps(3).unwrap(), 7);
/// ```
#[derive(Clone, Default)]
pub struct SharedStepCache {
    inner: Arc<Mutex<HashStepCache>>,
}

impl SharedStepCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // a panic while holding the lock cannot leave a half-written entry behind, so a poisoned
    // mutex still guards consistent data
    fn lock(&self) -> MutexGuard<'_, HashStepCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SharedStepCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStepCache")
            .field("len", &self.lock().len())
            .finish()
    }
}

impl StepCache for SharedStepCache {
    fn get(&self, value: u64) -> Option<StepCount> {
        self.lock().get(value)
    }

    fn insert(&mut self, value: u64, steps: StepCount) {
        self.lock().insert(value, steps);
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn clear(&mut self) {
        self.lock().clear();
    }
}

impl StepCache for BTreeMap<u64, StepCount> {
    fn get(&self, value: u64) -> Option<StepCount> {
        BTreeMap::get(self, &value).copied()
    }

    fn insert(&mut self, value: u64, steps: StepCount) {
        BTreeMap::insert(self, value, steps);
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }
}
