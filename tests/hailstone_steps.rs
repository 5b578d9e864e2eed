// (c) Copyright 2025 Helsing GmbH. All rights reserved.
use hailmerge::{
    StepCache, StepCount, StepCounter, StepError,
    hailstone::{self, HashStepCache, SharedStepCache},
    sentinel::CountingSentinel,
};
use std::thread;

/// Counts the inserts that go through to the wrapped cache.
#[derive(Default)]
struct CountingCache<C> {
    inner: C,
    inserts: usize,
}

impl<C: StepCache> StepCache for CountingCache<C> {
    fn get(&self, value: u64) -> Option<StepCount> {
        self.inner.get(value)
    }

    fn insert(&mut self, value: u64, steps: StepCount) {
        self.inserts += 1;
        self.inner.insert(value, steps);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

#[test]
fn memoized_agrees_with_naive() {
    let mut counter = StepCounter::new();
    for n in 1..=10_000 {
        assert_eq!(counter.opt_steps(n), hailstone::steps(n), "n = {n}");
    }
}

#[test]
fn small_step_counts() {
    let counts: Vec<_> = (1..=6).map(|n| hailstone::steps(n).unwrap()).collect();
    assert_eq!(counts, [0, 1, 7, 2, 5, 8]);
    assert_eq!(hailstone::steps(0), Ok(0));
}

#[test]
fn well_known_maxima() {
    let mut counter = StepCounter::new();
    assert_eq!(counter.max_steps([]), Ok(0));
    assert_eq!(counter.max_steps(1..=6), Ok(8));
    assert_eq!(counter.max_steps(1..=1_000), Ok(178));
    assert_eq!(counter.max_steps(1..=10_000), Ok(261));
    assert_eq!(counter.opt_steps(871), Ok(178));
    assert_eq!(counter.opt_steps(6_171), Ok(261));
    assert_eq!(hailstone::steps(837_799), Ok(524));
}

#[test]
fn repeated_call_computes_nothing_new() {
    let mut counter = StepCounter::with_cache(CountingCache::<HashStepCache>::default());
    assert_eq!(counter.opt_steps(27), Ok(111));
    let first = counter.cache().inserts;
    assert_eq!(first, 111);

    assert_eq!(counter.opt_steps(27), Ok(111));
    assert_eq!(counter.cache().inserts, first);

    // 54 halves into 27, so only 54 itself is new
    assert_eq!(counter.opt_steps(54), Ok(112));
    assert_eq!(counter.cache().inserts, first + 1);
}

#[test]
fn batch_computes_each_value_once() {
    let mut counter = StepCounter::with_cache(CountingCache::<HashStepCache>::default());
    counter.max_steps(1..=1_000).unwrap();
    // each distinct value is inserted exactly once
    assert_eq!(counter.cache().inserts, counter.cache().len());
    counter.max_steps(1..=1_000).unwrap();
    assert_eq!(counter.cache().inserts, counter.cache().len());
}

#[test]
fn sentinel_sees_hits_after_warmup() {
    let mut counter = StepCounter::new();
    let mut cold = CountingSentinel::default();
    counter.opt_steps_observed(6, &mut cold).unwrap();
    assert_eq!(
        cold,
        CountingSentinel {
            visited: 8,
            hits: 0,
            misses: 8
        }
    );

    let mut warm = CountingSentinel::default();
    counter.opt_steps_observed(12, &mut warm).unwrap();
    assert_eq!(
        warm,
        CountingSentinel {
            visited: 1,
            hits: 1,
            misses: 1
        }
    );
}

#[test]
fn failures_are_reported() {
    assert_eq!(hailstone::start_value(-3), Err(StepError::Negative(-3)));
    assert_eq!(hailstone::start_value(3), Ok(3));

    let odd = u64::MAX / 3 + 2;
    assert_eq!(hailstone::steps(odd), Err(StepError::Overflow(odd)));
    assert_eq!(
        StepCounter::new().opt_steps(odd),
        Err(StepError::Overflow(odd))
    );

    let mut capped = StepCounter::new().with_iteration_cap(50);
    assert_eq!(
        capped.opt_steps(27),
        Err(StepError::IterationCapExceeded { start: 27, cap: 50 })
    );
    assert_eq!(
        StepError::IterationCapExceeded { start: 27, cap: 50 }.to_string(),
        "sequence starting at 27 did not reach 1 within 50 steps"
    );
}

#[test]
fn threads_share_a_cache() {
    let cache = SharedStepCache::new();
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                let mut counter = StepCounter::with_cache(cache);
                counter.max_steps((t * 250 + 1)..=((t + 1) * 250))
            })
        })
        .collect();
    let max = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .max()
        .unwrap();
    assert_eq!(max, 178);

    // whatever the interleaving, the shared entries agree with a fresh single-threaded run
    let mut reference = StepCounter::new();
    reference.max_steps(1..=1_000).unwrap();
    assert_eq!(cache.len(), reference.cache().len());

    let mut counter = StepCounter::with_cache(cache);
    let mut sentinel = CountingSentinel::default();
    counter.opt_steps_observed(871, &mut sentinel).unwrap();
    assert_eq!(sentinel.misses, 0);
}
