// (c) Copyright 2025 Helsing GmbH. All rights reserved.
#![cfg_attr(not(target_os = "linux"), allow(dead_code, unused_imports))]

use hailmerge::{IntervalSet, StepCounter, hailstone, interval};
use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use std::hint::black_box;

include!(concat!(env!("OUT_DIR"), "/random_inputs.rs"));

fn setup_counter(warm: bool) -> StepCounter {
    hailmerge::enable_determinism();

    let mut counter = StepCounter::new();
    if warm {
        counter.max_steps(RANDOM_STARTS.iter().copied()).unwrap();
    }
    counter
}

#[library_benchmark]
#[bench::small(27)]
#[bench::large(837_799)]
fn naive_steps(n: u64) {
    black_box(hailstone::steps(black_box(n)).unwrap());
}

#[library_benchmark]
#[bench::cold(setup_counter(false))]
#[bench::warm(setup_counter(true))]
fn opt_steps_batch(mut counter: StepCounter) {
    let max = counter.max_steps(black_box(RANDOM_STARTS).iter().copied());
    black_box(max.unwrap());
}

struct Sets {
    left: IntervalSet,
    right: IntervalSet,
}

fn setup_sets() -> Sets {
    Sets {
        left: IntervalSet::from_intervals(RANDOM_SET_LEFT).unwrap(),
        right: IntervalSet::from_intervals(RANDOM_SET_RIGHT).unwrap(),
    }
}

#[library_benchmark]
#[bench::big(setup_sets())]
fn merge_big_big(sets: Sets) {
    let sets = black_box(sets);
    black_box(interval::merge(&sets.left, &sets.right));
}

#[library_benchmark]
#[bench::big(setup_sets())]
fn union_big_big(sets: Sets) {
    let sets = black_box(sets);
    black_box(interval::union(&sets.left, &sets.right));
}

library_benchmark_group!(
    name = hailstones;
    benchmarks = naive_steps, opt_steps_batch
);
library_benchmark_group!(
    name = interval_sets;
    benchmarks = merge_big_big, union_big_big
);

#[cfg(target_os = "linux")]
main!(library_benchmark_groups = hailstones, interval_sets);

#[cfg(not(target_os = "linux"))]
fn main() {}
