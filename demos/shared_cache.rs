// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Several threads count hailstone steps over disjoint ranges while feeding one shared cache.
//!
//! Every thread keeps running into tails that another thread already memoized, which shows up
//! as cache hits in its summary line.

use hailmerge::{
    StepCache, StepCount, StepCounter, StepError, hailstone::SharedStepCache,
    sentinel::CountingSentinel,
};
use std::{error::Error, thread};
use tracing::info;
use tracing_subscriber::EnvFilter;

const THREADS: u64 = 4;
const PER_THREAD: u64 = 25_000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cache = SharedStepCache::new();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                let mut counter = StepCounter::with_cache(cache);
                let mut sentinel = CountingSentinel::default();
                let mut max: StepCount = 0;
                for n in (t * PER_THREAD + 1)..=((t + 1) * PER_THREAD) {
                    max = max.max(counter.opt_steps_observed(n, &mut sentinel)?);
                }
                Ok::<_, StepError>((t, max, sentinel))
            })
        })
        .collect();

    for handle in handles {
        let (t, max, sentinel) = handle.join().map_err(|_| "counting thread panicked")??;
        info!(
            thread = t,
            max_steps = max,
            hits = sentinel.hits,
            misses = sentinel.misses,
            "finished range"
        );
    }

    println!(
        "{} values cached for {} start values",
        cache.len(),
        THREADS * PER_THREAD
    );
    Ok(())
}
