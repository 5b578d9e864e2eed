// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! Implementation of the quickcheck::Arbitrary trait for the interval types.

use super::{Interval, IntervalSet};
use quickcheck::{Arbitrary, Gen};

// Skew the distribution to increase the likelihood of triggering bugs.
// Interesting code paths happen when intervals are narrow and packed closely together, where
// shared bounds and gaps of one are common.
const WIDTHS: [i64; 8] = [0, 0, 0, 1, 1, 2, 3, 5];
const GAPS: [i64; 8] = [1, 1, 1, 2, 2, 3, 5, 8];

fn skewed(g: &mut Gen, choices: &[i64]) -> i64 {
    let wide = i64::from(u8::arbitrary(g));
    let pick = g.choose(choices).copied().unwrap_or(wide);
    // every so often, fall back to something wide
    if bool::arbitrary(g) && u8::arbitrary(g) < 16 {
        wide
    } else {
        pick
    }
}

impl Arbitrary for Interval {
    fn arbitrary(g: &mut Gen) -> Self {
        let low = i64::from(i16::arbitrary(g));
        Self::new(low, low + skewed(g, &WIDTHS))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let Self { low, high } = *self;
        Box::new(
            (low, high - low)
                .shrink()
                .filter(|&(_, width)| width >= 0)
                .map(|(low, width)| Self::new(low, low.saturating_add(width))),
        )
    }
}

/// Generated sets are always normalized.
impl Arbitrary for IntervalSet {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() + 1);
        let mut low = i64::from(i16::arbitrary(g));
        let mut ivals = Vec::with_capacity(len);
        for _ in 0..len {
            let high = low + skewed(g, &WIDTHS);
            ivals.push(Interval::new(low, high));
            low = high + skewed(g, &GAPS).max(1);
        }
        Self(ivals)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // dropping intervals keeps the set normalized, shrinking them in place might not
        let ivals = self.0.clone();
        Box::new((0..ivals.len()).map(move |skip| {
            Self(
                ivals
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &ival)| ival)
                    .collect(),
            )
        }))
    }
}
