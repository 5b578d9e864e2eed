// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! # Hailstone Step Counting
//!
//! The hailstone (Collatz) sequence of `n` is created by repeating:
//!
//! 1. if the value is 1, stop;
//! 2. if the value is even, halve it;
//! 3. if the value is odd, multiply it by 3 and add 1.
//!
//! The number of transitions taken to reach 1 is the value's *step count*:
//!
//! | start | sequence                    | steps |
//! |-------|-----------------------------|-------|
//! | 1     | `1`                         | 0     |
//! | 2     | `2 1`                       | 1     |
//! | 3     | `3 10 5 16 8 4 2 1`         | 7     |
//! | 4     | `4 2 1`                     | 2     |
//! | 5     | `5 16 8 4 2 1`              | 5     |
//! | 6     | `6 3 10 5 16 8 4 2 1`       | 8     |
//!
//! Two counters are provided:
//!
//! - [`steps`] walks the whole sequence every time. It keeps no state.
//! - [`StepCounter::opt_steps`] consults a [`StepCache`] before walking. Every value it has to
//!   walk through gets its own step count cached, so each distinct value is computed at most
//!   once for the lifetime of the cache. Over a batch of start values that share tails this
//!   turns repeated re-traversal into amortized-linear work.
//!
//! Both counters are loops rather than recursion, so long sequences cannot exhaust the stack.
//!
//! ## Domain
//!
//! Start values are `u64`, so negative inputs cannot reach the counters. Code holding signed
//! values converts with [`start_value`]. `0` and `1` have a step count of 0.
//!
//! The `3n + 1` transition is checked: a sequence that would leave the `u64` range fails with
//! [`StepError::Overflow`] instead of wrapping. Termination for every positive integer is the
//! (unproven) Collatz conjecture; callers that want a hard bound can set an iteration cap, see
//! [`steps_capped`] and [`StepCounter::with_iteration_cap`].

use crate::sentinel::{DummySentinel, StepSentinel};
use smallvec::SmallVec;
use std::{cell::RefCell, fmt};
use tracing::{debug, trace};

mod cache;
pub use cache::{HashStepCache, SharedStepCache, StepCache};

/// Number of transitions needed to reach 1.
pub type StepCount = u32;

/// Errors produced while counting hailstone steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// A signed start value was negative.
    Negative(i64),
    /// `3n + 1` does not fit in a `u64` for the contained odd value.
    Overflow(u64),
    /// The sequence of `start` needed more than `cap` transitions.
    IterationCapExceeded { start: u64, cap: usize },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative(n) => write!(f, "start value must not be negative, got {n}"),
            Self::Overflow(n) => write!(f, "3 * {n} + 1 overflows u64"),
            Self::IterationCapExceeded { start, cap } => write!(
                f,
                "sequence starting at {start} did not reach 1 within {cap} steps"
            ),
        }
    }
}

impl std::error::Error for StepError {}

/// Converts a signed value into a start value.
pub fn start_value(n: i64) -> Result<u64, StepError> {
    u64::try_from(n).map_err(|_| StepError::Negative(n))
}

/// Computes the value following `n` in its hailstone sequence.
///
/// This is a single transition; it does not special-case 1 (whose successor is 4).
#[inline]
pub fn next(n: u64) -> Result<u64, StepError> {
    if n % 2 == 0 {
        Ok(n / 2)
    } else {
        n.checked_mul(3)
            .and_then(|tripled| tripled.checked_add(1))
            .ok_or(StepError::Overflow(n))
    }
}

/// Counts the steps needed for `n` to reach 1, without any memoization.
pub fn steps(n: u64) -> Result<StepCount, StepError> {
    walk(n, None, &mut DummySentinel)
}

/// Like [`steps`], but reports every value after `n` to `sentinel` in sequence order.
///
/// For `n >= 2` the last visited value is always 1.
pub fn steps_traced<S>(n: u64, mut sentinel: S) -> Result<StepCount, StepError>
where
    S: StepSentinel,
{
    walk(n, None, &mut sentinel)
}

/// Like [`steps`], but gives up after `cap` transitions.
pub fn steps_capped(n: u64, cap: usize) -> Result<StepCount, StepError> {
    walk(n, Some(cap), &mut DummySentinel)
}

fn walk<S>(start: u64, cap: Option<usize>, sentinel: &mut S) -> Result<StepCount, StepError>
where
    S: StepSentinel,
{
    let mut current = start;
    let mut steps: StepCount = 0;
    while current >= 2 {
        if let Some(cap) = cap {
            if steps as usize >= cap {
                return Err(StepError::IterationCapExceeded { start, cap });
            }
        }
        current = next(current)?;
        sentinel.visit(current);
        steps += 1;
    }
    Ok(steps)
}

/// A memoizing hailstone step counter.
///
/// The counter owns its [`StepCache`]. Dropping the counter drops the memoized values unless
/// the cache is shared (see [`SharedStepCache`]) or taken back with
/// [`into_cache`](Self::into_cache).
pub struct StepCounter<C = HashStepCache> {
    cache: C,
    iteration_cap: Option<usize>,
}

impl StepCounter {
    /// Creates a counter backed by an empty [`HashStepCache`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(HashStepCache::new())
    }
}

impl Default for StepCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for StepCounter<C>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCounter")
            .field("cache", &self.cache)
            .field("iteration_cap", &self.iteration_cap)
            .finish()
    }
}

impl<C> StepCounter<C>
where
    C: StepCache,
{
    /// Creates a counter using the given cache. The cache may already hold entries.
    #[must_use]
    pub fn with_cache(cache: C) -> Self {
        debug!(cached = cache.len(), "created hailstone step counter");
        Self {
            cache,
            iteration_cap: None,
        }
    }

    /// Limits how many transitions a single call may walk.
    ///
    /// Only transitions that are actually walked count against the cap; a value found in the
    /// cache ends the walk. The cap thus bounds the work of one call, not the step count it may
    /// return.
    #[must_use]
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = Some(cap);
        self
    }

    #[must_use]
    pub fn iteration_cap(&self) -> Option<usize> {
        self.iteration_cap
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    #[must_use]
    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Forgets all memoized step counts.
    pub fn clear(&mut self) {
        debug!(evicted = self.cache.len(), "clearing hailstone step cache");
        self.cache.clear();
    }

    /// Counts the steps needed for `n` to reach 1, memoizing every value computed on the way.
    pub fn opt_steps(&mut self, n: u64) -> Result<StepCount, StepError> {
        self.opt_steps_observed(n, DummySentinel)
    }

    /// Like [`opt_steps`](Self::opt_steps), reporting cache hits, misses and walked values to
    /// `sentinel`.
    ///
    /// A cache hit ends the walk, so at most one hit is reported per call. Misses are reported
    /// once the step counts are known, from the value closest to 1 back to `n`.
    pub fn opt_steps_observed<S>(&mut self, n: u64, mut sentinel: S) -> Result<StepCount, StepError>
    where
        S: StepSentinel,
    {
        // values whose step count is unknown, in sequence order
        let mut trail = SmallVec::<[u64; 32]>::new();
        let mut current = n;
        let mut known: StepCount = 0;
        while current >= 2 {
            if let Some(steps) = self.cache.get(current) {
                sentinel.hit(current, steps);
                known = steps;
                break;
            }
            if let Some(cap) = self.iteration_cap {
                if trail.len() >= cap {
                    return Err(StepError::IterationCapExceeded { start: n, cap });
                }
            }
            trail.push(current);
            current = next(current)?;
            sentinel.visit(current);
        }

        if !trail.is_empty() {
            trace!(start = n, computed = trail.len(), "memoizing hailstone trail");
        }
        for &value in trail.iter().rev() {
            known += 1;
            self.cache.insert(value, known);
            sentinel.miss(value);
        }
        Ok(known)
    }

    /// Returns the largest step count among `numbers`, or 0 if there are none.
    pub fn max_steps<I>(&mut self, numbers: I) -> Result<StepCount, StepError>
    where
        I: IntoIterator<Item = u64>,
    {
        numbers
            .into_iter()
            .try_fold(0, |max, n| Ok(max.max(self.opt_steps(n)?)))
    }
}

thread_local! {
    static DEFAULT_COUNTER: RefCell<StepCounter> = RefCell::new(StepCounter::new());
}

/// Memoized step count using this thread's default counter.
///
/// The default counter lives as long as the thread, so repeated calls keep benefiting from
/// earlier ones.
pub fn opt_steps(n: u64) -> Result<StepCount, StepError> {
    DEFAULT_COUNTER.with_borrow_mut(|counter| counter.opt_steps(n))
}

/// Largest step count among `numbers` using this thread's default counter.
///
/// The default counter is only borrowed for each single count, so `numbers` may itself use
/// the free functions of this module.
pub fn max_steps<I>(numbers: I) -> Result<StepCount, StepError>
where
    I: IntoIterator<Item = u64>,
{
    numbers
        .into_iter()
        .try_fold(0, |max, n| Ok(max.max(opt_steps(n)?)))
}
