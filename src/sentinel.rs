// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Observe the work done while counting hailstone steps.
//!
//! Sentinels are types that can be used to inspect what a step counter does as it walks a
//! sequence. They are useful for printing the visited values (the classic "show me the
//! sequence" driver), for asserting memoization effectiveness in tests, or simply to observe
//! the computation for any other purpose (for example, logging, metrics, etc).
//!
//! The main entry point for this module is the [`StepSentinel`] trait. Every method has a
//! no-op default, so an implementor only overrides what it cares about.
//!
//! For a testing-oriented example, see the `recording_sentinel` module.

use crate::hailstone::StepCount;

pub mod recording_sentinel;

/// Observes a hailstone step computation.
///
/// The naive counter ([`steps_traced`](crate::hailstone::steps_traced)) only ever reports
/// [`visit`](Self::visit). The memoizing counter
/// ([`StepCounter::opt_steps_observed`](crate::StepCounter::opt_steps_observed)) additionally
/// reports cache hits and misses.
#[expect(unused_variables)]
pub trait StepSentinel {
    /// Observe a value reached by one transition of the sequence.
    ///
    /// The start value itself is not visited, so the number of visits made by the naive
    /// counter equals the step count.
    fn visit(&mut self, value: u64) {}

    /// Observe a value whose step count was already known to the cache.
    fn hit(&mut self, value: u64, steps: StepCount) {}

    /// Observe a value whose step count had to be computed and was then cached.
    fn miss(&mut self, value: u64) {}
}

/// A Sentinel that does nothing.
///
/// This is useful when the computation doesn't need any introspection. Using it helps the
/// compiler optimise some code away.
pub struct DummySentinel;

impl StepSentinel for DummySentinel {}

/// Forwards visited values to a closure.
///
/// Handy for streaming a sequence somewhere without defining a type:
///
/// ```rust
/// use hailmerge::{hailstone, sentinel::VisitFn};
///
/// let mut seen = Vec::new();
/// hailstone::steps_traced(3, &mut VisitFn(|v| seen.push(v))).unwrap();
/// assert_eq!(seen, [10, 5, 16, 8, 4, 2, 1]);
/// ```
pub struct VisitFn<F>(pub F);

impl<F> StepSentinel for VisitFn<F>
where
    F: FnMut(u64),
{
    fn visit(&mut self, value: u64) {
        (self.0)(value)
    }
}

/// A Sentinel that counts cache hits and misses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSentinel {
    pub visited: usize,
    pub hits: usize,
    pub misses: usize,
}

impl StepSentinel for CountingSentinel {
    fn visit(&mut self, _value: u64) {
        self.visited += 1;
    }

    fn hit(&mut self, _value: u64, _steps: StepCount) {
        self.hits += 1;
    }

    fn miss(&mut self, _value: u64) {
        self.misses += 1;
    }
}

impl<S> StepSentinel for &mut S
where
    S: StepSentinel + ?Sized,
{
    fn visit(&mut self, value: u64) {
        (**self).visit(value)
    }

    fn hit(&mut self, value: u64, steps: StepCount) {
        (**self).hit(value, steps)
    }

    fn miss(&mut self, value: u64) {
        (**self).miss(value)
    }
}
