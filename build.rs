// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Generates fixed pseudo-random inputs for the benchmarks.
//!
//! The values are produced once at build time from a constant seed, so every bench run (and
//! both bench harnesses) sees the exact same workload.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Geometric};
use std::{env, fmt::Write as _, fs, path::Path};

const SEED: u64 = 0x5eed_c011_a72e;
const START_VALUES: usize = 4096;
const SET_LEN: usize = 512;

fn main() {
    println!("cargo::rerun-if-changed=build.rs");

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut out = String::new();

    let starts: Vec<u64> = (0..START_VALUES)
        .map(|_| rng.random_range(1..1_000_000))
        .collect();
    writeln!(out, "#[allow(dead_code)]").unwrap();
    writeln!(out, "const RANDOM_STARTS: [u64; {START_VALUES}] = {starts:?};").unwrap();

    // gaps are mostly small so that merging two sets produces plenty of overlaps
    let gaps = Geometric::new(0.3).unwrap();
    let widths = Geometric::new(0.1).unwrap();
    for name in ["RANDOM_SET_LEFT", "RANDOM_SET_RIGHT"] {
        let mut low: i64 = 0;
        let mut pairs = Vec::with_capacity(SET_LEN);
        for _ in 0..SET_LEN {
            let high = low + widths.sample(&mut rng) as i64;
            pairs.push((low, high));
            low = high + 1 + gaps.sample(&mut rng) as i64;
        }
        writeln!(out, "#[allow(dead_code)]").unwrap();
        writeln!(out, "const {name}: [(i64, i64); {SET_LEN}] = {pairs:?};").unwrap();
    }

    let dest = Path::new(&env::var("OUT_DIR").unwrap()).join("random_inputs.rs");
    fs::write(dest, out).unwrap();
}
