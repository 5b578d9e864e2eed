// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Merges pairs of interval sets and prints the inputs alongside the single-sweep merge and
//! the normalized union.
//!
//! Cases 4, 5 and 7 break the "sorted and disjoint" precondition on purpose. They are built with
//! the unchecked `intervals!` macro to show what the merger makes of such input.

use hailmerge::{IntervalSet, intervals};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn print_set(name: &str, set: &IntervalSet) {
    println!("-------------- Range Set {name} ----------------");
    println!("{set}");
}

fn main() {
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cases = [
        (
            intervals![(1, 3), (40, 70), (100, 200)],
            intervals![(5, 15), (21, 31), (83, 92)],
        ),
        (
            intervals![(1, 3), (4, 7), (8, 20)],
            intervals![(50, 150), (210, 310), (830, 920)],
        ),
        (
            intervals![(10, 30), (40, 70), (80, 200)],
            intervals![(2, 3), (4, 6), (7, 9)],
        ),
        (
            intervals![(1, 3), (4000, 7000), (800, 20000)],
            intervals![(50, 150), (210, 310), (830, 920)],
        ),
        (
            intervals![(10, 30), (40, 70), (80, 200)],
            intervals![(2, 3), (400, 600), (7, 900)],
        ),
        (
            intervals![(1, 7), (18, 70), (78, 200)],
            intervals![(5, 15), (21, 31), (83, 92)],
        ),
        (
            intervals![(1, 3), (40, 70), (80, 200)],
            intervals![(5, 15), (45, 75), (50, 250)],
        ),
        (
            intervals![(10, 30), (40, 70), (80, 200)],
            intervals![(2, 3), (8, 35), (38, 75)],
        ),
        (
            intervals![(1, 3), (40, 100), (220, 300)],
            intervals![(50, 150), (210, 310), (830, 920)],
        ),
        (
            intervals![(10, 30), (40, 70), (80, 200)],
            intervals![(11, 28), (38, 72), (88, 198)],
        ),
    ];

    for (i, (left, right)) in cases.iter().enumerate() {
        let case = i + 1;
        println!();
        println!("Case {case}");
        for (name, set) in [("Input S1", left), ("Input S2", right)] {
            print_set(name, set);
            if !set.is_normalized() {
                warn!(case, input = name, "input is not sorted and disjoint");
            }
        }

        let merged = left.merge(right);
        print_set("Merged Set from S1 and S2", &merged);
        let unioned = left.union(right);
        print_set("Normalized Union of S1 and S2", &unioned);
        if merged != unioned {
            info!(
                case,
                merged = merged.len(),
                normalized = unioned.len(),
                "single sweep left overlapping intervals behind"
            );
        }
    }

    #[cfg(feature = "json")]
    {
        let (left, right) = &cases[0];
        println!();
        println!("{}", serde_json::Value::from(left.union(right)));
    }
}
