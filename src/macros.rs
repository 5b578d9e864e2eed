// (c) Copyright 2025 Helsing GmbH. All rights reserved.
/// Convenience macro for creating an [`Interval`](crate::Interval).
///
/// Accepts either a single point or a `low, high` pair. Panics if `low > high`.
///
/// ```rust
/// # use hailmerge::{interval, Interval};
/// assert_eq!(interval!(4), Interval::new(4, 4));
/// assert_eq!(interval!(1, 3), Interval::new(1, 3));
/// ```
#[macro_export]
macro_rules! interval {
    ($point:expr) => {
        $crate::Interval::point($point)
    };
    ($low:expr, $high:expr) => {
        $crate::Interval::new($low, $high)
    };
}

/// Convenience macro for creating an [`IntervalSet`](crate::IntervalSet) from `(low, high)`
/// pairs, written the way sets are printed.
///
/// NOTE! The pairs are taken as-is, without checking that they are sorted and disjoint. This
/// is mostly useful for tests, which often need to feed deliberately broken input to the
/// merger. Use [`IntervalSet::from_intervals`](crate::IntervalSet::from_intervals) when the
/// input must be validated.
///
/// ```rust
/// # use hailmerge::intervals;
/// let set = intervals![(1, 3), (40, 70), (100, 200)];
/// assert_eq!(set.len(), 3);
/// assert!(set.is_normalized());
///
/// let empty = intervals![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! intervals {
    ($(($low:expr, $high:expr)),* $(,)?) => {
        $crate::IntervalSet::from_intervals_unchecked([
            $( $crate::interval!($low, $high) ),*
        ])
    };
}
