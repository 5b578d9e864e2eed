// (c) Copyright 2025 Helsing GmbH. All rights reserved.
//! # Interval and IntervalSet
//!
//! This module provides the `Interval` and `IntervalSet` data structures together with the
//! operations that merge two sets into one.
//!
//! ## `Interval`
//!
//! An `Interval` represents a closed range of signed 64-bit integers, `low..=high`, with
//! `low <= high`. A single integer is an interval whose bounds coincide.
//!
//! ## `IntervalSet`
//!
//! An `IntervalSet` is an ordered sequence of `Interval`s. A set is *normalized* when every
//! interval ends strictly before the next one starts: for adjacent `(a, b)` and `(c, d)`,
//! `b < c`. Note that `(1, 3)` followed by `(4, 7)` is normalized even though no integer lies
//! in between; only sharing a bound (or more) counts as overlap.
//!
//! Sets built through [`IntervalSet::from_intervals`], [`FromIterator`] or [`Extend`] are
//! always normalized. [`IntervalSet::from_intervals_unchecked`] takes intervals as given, which
//! lets callers hand the merger exactly what they have, precondition violations included.
//!
//! ## Merging
//!
//! [`merge`] sweeps both sets with one cursor each and never revisits an interval it has
//! already emitted. [`union`] additionally normalizes the result. See the [`merge`] docs for
//! when the two differ.

use std::{cmp::Ordering, fmt, ops::RangeInclusive};

#[cfg(any(test, feature = "arbitrary"))]
mod arbitrary;
mod merge;
pub use merge::{merge, union};

/// A closed range of integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Deserialize, ::serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Bounds", into = "Bounds"))]
pub struct Interval {
    /// Start of the interval (inclusive)
    low: i64,
    /// End of the interval (inclusive)
    high: i64,
}

/// Serialized form of an [`Interval`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(::serde::Deserialize, ::serde::Serialize)]
struct Bounds {
    low: i64,
    high: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<Bounds> for Interval {
    type Error = IntervalError;

    fn try_from(Bounds { low, high }: Bounds) -> Result<Self, Self::Error> {
        Self::try_from((low, high))
    }
}

#[cfg(feature = "serde")]
impl From<Interval> for Bounds {
    fn from(Interval { low, high }: Interval) -> Self {
        Self { low, high }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.low, self.high)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Orders intervals by position when they are disjoint.
///
/// `Less` means `self` ends strictly before `other` starts and `Greater` the reverse. Identical
/// intervals are `Equal`. Any other pair overlaps (they share at least one integer) and has no
/// defined order.
impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.high < other.low {
            Some(Ordering::Less)
        } else if other.high < self.low {
            Some(Ordering::Greater)
        } else if self == other {
            // total overlap
            Some(Ordering::Equal)
        } else {
            // partial overlap
            None
        }
    }
}

impl From<i64> for Interval {
    fn from(value: i64) -> Self {
        Self::point(value)
    }
}

impl TryFrom<(i64, i64)> for Interval {
    type Error = IntervalError;

    fn try_from((low, high): (i64, i64)) -> Result<Self, Self::Error> {
        (low <= high)
            .then_some(Self { low, high })
            .ok_or(IntervalError("low must be <= high"))
    }
}

impl TryFrom<RangeInclusive<i64>> for Interval {
    type Error = IntervalError;

    fn try_from(value: RangeInclusive<i64>) -> Result<Self, Self::Error> {
        Self::try_from(value.into_inner())
    }
}

/// Error for intervals or interval sets that violate their invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalError(pub(crate) &'static str);

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for IntervalError {}

impl Interval {
    /// Creates a new [`Interval`] spanning `low..=high`.
    ///
    /// # Panics
    /// The given `low` must not be greater than `high`, otherwise this function panics. Use
    /// [`TryFrom`] to get an error instead.
    #[must_use]
    pub fn new(low: i64, high: i64) -> Self {
        assert!(low <= high, "{low} <= {high}");
        Self { low, high }
    }

    /// Creates a new [`Interval`] containing a single point.
    #[must_use]
    pub fn point(value: i64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    #[must_use]
    pub fn low(&self) -> i64 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Iterator over all the integers that this interval holds
    pub fn values(&self) -> impl Iterator<Item = i64> + use<> {
        self.low..=self.high
    }

    /// Returns whether the two intervals share no integer.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.high < other.low || other.high < self.low
    }

    /// The smallest interval covering both `self` and `other`, whether or not they overlap.
    #[must_use]
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }

    /// Combines two intervals together, if they overlap.
    ///
    /// Intervals that share at least one integer (including a single bound, as `(1, 4)` and
    /// `(4, 7)` do) merge into their hull. Intervals that are strictly disjoint return `None`,
    /// even when no integer lies in between as with `(1, 3)` and `(4, 7)`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Option<Self> {
        (!self.is_disjoint(other)).then(|| self.hull(other))
    }

    /// The length of this interval.
    ///
    /// Alternatively, the number of individual integer values it contains. Saturates at
    /// `u64::MAX` for the one interval that covers every `i64`.
    pub fn interval_length(&self) -> u64 {
        self.high.abs_diff(self.low).saturating_add(1)
    }
}

/// An ordered sequence of intervals.
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Deserialize, ::serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Interval>", into = "Vec<Interval>")
)]
pub struct IntervalSet(Vec<Interval>);

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

/// Renders the set as a list of pairs: `[(1, 3), (5, 15)]`.
impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, ival) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ival}")?;
        }
        f.write_str("]")
    }
}

impl IntervalSet {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn single(ival: impl Into<Interval>) -> Self {
        Self(Vec::from([ival.into()]))
    }

    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    /// Builds a set from `(low, high)` pairs, checking every invariant.
    ///
    /// The pairs must already be in ascending order and strictly disjoint; they are not sorted
    /// or merged here.
    pub fn from_intervals(
        iter: impl IntoIterator<Item = (i64, i64)>,
    ) -> Result<Self, IntervalError> {
        let ivals = iter
            .into_iter()
            .map(Interval::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(ivals)
    }

    /// Builds a set from intervals as given, without checking order or overlap.
    ///
    /// The result may not be normalized. It is still a valid input to [`merge`], which simply
    /// produces unspecified (but never panicking) output for it.
    #[must_use]
    pub fn from_intervals_unchecked(iter: impl IntoIterator<Item = Interval>) -> Self {
        Self(iter.into_iter().collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn first(&self) -> Option<Interval> {
        self.0.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Interval> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Interval> {
        self.0
    }

    /// The total length of all intervals, summed
    #[must_use]
    pub fn total_interval_length(&self) -> u64 {
        self.0
            .iter()
            .map(Interval::interval_length)
            .fold(0, u64::saturating_add)
    }

    /// Iterator over all the integers of this set
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().flat_map(Interval::values)
    }

    /// Iterator over the raw `(low, high)` bounds of this set
    pub fn intervals(&self) -> impl ExactSizeIterator<Item = (i64, i64)> + '_ {
        self.0.iter().map(Interval::bounds)
    }

    /// Returns whether every interval ends strictly before the next one starts.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0].high < pair[1].low)
    }

    /// Returns whether `value` lies in any interval of this set.
    ///
    /// Relies on the set being normalized.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        let p = self.0.partition_point(|s| s.high < value);
        self.0.get(p).is_some_and(|ival| ival.contains(value))
    }

    pub fn insert(&mut self, value: impl Into<Interval>) {
        let ival = value.into();

        // find the first interval that does not strictly precede `ival`. this means it could
        // overlap with it or be strictly after. we cover each case below.
        let i = self.0.partition_point(|s| s.high < ival.low);
        if i == self.0.len() {
            // all elements strictly before `ival`, so just add the new interval to the end
            self.0.push(ival);
        } else if let Some(merged) = self.0[i].merge(&ival) {
            self.0[i] = merged;
            // the grown interval may now reach into its successors, so we run compaction for
            // the remaining vector
            self.normalize_starting_at(i);
        } else {
            // this means there is a gap between `ival` and the values before and after
            self.0.insert(i, ival);
        }
    }

    /// Coalesces every pair of intervals that are not strictly disjoint.
    ///
    /// Afterwards the set is normalized and covers exactly the same integers as before. This
    /// also repairs sets that are out of order, as produced by merging inputs that violated
    /// the ordering precondition.
    pub fn normalize(&mut self) {
        if self.is_normalized() {
            return;
        }
        // stable, so intervals sharing a low bound keep their relative order
        self.0.sort_by_key(Interval::low);
        let mut write = 0;
        for read in 1..self.0.len() {
            if let Some(merged) = self.0[write].merge(&self.0[read]) {
                self.0[write] = merged;
            } else {
                write += 1;
                self.0[write] = self.0[read];
            }
        }
        self.0.truncate(write + 1);
    }

    /// Owned version of [`normalize`](Self::normalize).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// See [`merge`].
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        merge(self, other)
    }

    /// See [`union`].
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        union(self, other)
    }

    // assumes only the interval at `i` has grown since the set was last normalized
    fn normalize_starting_at(&mut self, i: usize) {
        let right_start = i + 1;
        for j in right_start..self.0.len() {
            if let Some(merged) = self.0[i].merge(&self.0[j]) {
                self.0[i] = merged;
            } else {
                if j != right_start {
                    // the segment `i+1..j` was swallowed by `i`; shift what follows to the
                    // left by rotating it over the swallowed segment and truncating.
                    let n = j - i - 1;
                    self.0[right_start..].rotate_left(n);
                    self.0.truncate(self.0.len() - n);
                }
                return;
            }
        }
        // everything from `i` onwards collapsed into a single interval
        self.0.truncate(right_start);
    }
}

impl TryFrom<Vec<Interval>> for IntervalSet {
    type Error = IntervalError;

    fn try_from(ivals: Vec<Interval>) -> Result<Self, Self::Error> {
        let set = Self(ivals);
        set.is_normalized()
            .then_some(set)
            .ok_or(IntervalError("intervals must be sorted and disjoint"))
    }
}

impl From<IntervalSet> for Vec<Interval> {
    fn from(set: IntervalSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<T: IntoIterator<Item = Interval>>(&mut self, iter: T) {
        for ival in iter {
            self.insert(ival);
        }
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        let mut new = Self::new();
        new.extend(iter);
        new
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    impl IntervalSet {
        fn assert_normalized(&self) {
            let mut compacted = self.clone();
            compacted.normalize();
            assert_eq!(self, &compacted);
            assert!(self.is_normalized(), "{self:?}");
        }
    }

    fn set(pairs: &[(i64, i64)]) -> IntervalSet {
        IntervalSet::from_intervals(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn interval_construction() {
        let ival = Interval::new(1, 3);
        assert_eq!(ival.bounds(), (1, 3));
        assert_eq!(ival.interval_length(), 3);
        assert_eq!(ival.values().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(format!("{ival:?}"), "1..=3");
        assert_eq!(ival.to_string(), "(1, 3)");

        assert_eq!(Interval::from(5), Interval::new(5, 5));
        assert_eq!(Interval::point(5).interval_length(), 1);
        assert_eq!(Interval::try_from(2..=9), Ok(Interval::new(2, 9)));
        assert_eq!(
            Interval::try_from((9, 2)),
            Err(IntervalError("low must be <= high"))
        );
        assert_eq!(
            Interval::new(i64::MIN, i64::MAX).interval_length(),
            u64::MAX
        );
    }

    #[test]
    #[should_panic(expected = "3 <= 1")]
    fn interval_new_rejects_inverted_bounds() {
        let _ = Interval::new(3, 1);
    }

    #[test]
    fn interval_ordering() {
        let a = Interval::new(1, 3);
        assert_eq!(a.partial_cmp(&Interval::new(4, 7)), Some(Ordering::Less));
        assert_eq!(Interval::new(4, 7).partial_cmp(&a), Some(Ordering::Greater));
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
        assert_eq!(a.partial_cmp(&Interval::new(3, 7)), None);
        assert_eq!(a.partial_cmp(&Interval::new(0, 10)), None);
    }

    #[test]
    fn interval_merge_tie_break() {
        // sharing a bound merges
        assert_eq!(
            Interval::new(1, 4).merge(&Interval::new(4, 7)),
            Some(Interval::new(1, 7))
        );
        // no integer in between, but no shared integer either: stays apart
        assert_eq!(Interval::new(1, 3).merge(&Interval::new(4, 7)), None);
        assert_eq!(Interval::new(4, 7).merge(&Interval::new(1, 3)), None);
        // containment
        assert_eq!(
            Interval::new(10, 30).merge(&Interval::new(11, 28)),
            Some(Interval::new(10, 30))
        );
        // hull ignores disjointness
        assert_eq!(
            Interval::new(1, 3).hull(&Interval::new(10, 12)),
            Interval::new(1, 12)
        );
    }

    #[test]
    fn from_intervals_validates() {
        let ivals = set(&[(1, 3), (4, 7), (8, 20)]);
        assert_eq!(ivals.len(), 3);
        assert_eq!(ivals.first(), Some(Interval::new(1, 3)));
        assert_eq!(ivals.last(), Some(Interval::new(8, 20)));
        assert_eq!(
            ivals.intervals().collect::<Vec<_>>(),
            [(1, 3), (4, 7), (8, 20)]
        );
        ivals.assert_normalized();

        assert_eq!(
            IntervalSet::from_intervals([(1, 4), (4, 7)]),
            Err(IntervalError("intervals must be sorted and disjoint"))
        );
        assert_eq!(
            IntervalSet::from_intervals([(40, 70), (1, 3)]),
            Err(IntervalError("intervals must be sorted and disjoint"))
        );
        assert_eq!(
            IntervalSet::from_intervals([(1, 3), (7, 4)]),
            Err(IntervalError("low must be <= high"))
        );
        assert!(IntervalSet::from_intervals([]).unwrap().is_empty());
    }

    #[test]
    fn unchecked_keeps_input_as_is() {
        let raw = [Interval::new(40, 70), Interval::new(1, 3), Interval::new(2, 5)];
        let ivals = IntervalSet::from_intervals_unchecked(raw);
        assert_eq!(ivals.as_slice(), raw);
        assert!(!ivals.is_normalized());

        let ivals = ivals.normalized();
        assert_eq!(ivals, set(&[(1, 5), (40, 70)]));
    }

    #[test]
    fn contains_and_values() {
        let ivals = set(&[(-3, -1), (3, 4), (6, 8)]);
        for v in [-3, -2, -1, 3, 4, 6, 7, 8] {
            assert!(ivals.contains(v), "{v}");
        }
        for v in [-4, 0, 1, 2, 5, 9] {
            assert!(!ivals.contains(v), "{v}");
        }
        assert_eq!(
            ivals.values().collect::<Vec<_>>(),
            [-3, -2, -1, 3, 4, 6, 7, 8]
        );
        assert_eq!(ivals.total_interval_length(), 8);
    }

    #[test]
    fn single_and_into_inner() {
        let ivals = IntervalSet::single(4);
        assert_eq!(ivals.len(), 1);
        assert_eq!(ivals.first(), Some(Interval::point(4)));
        assert_eq!(ivals.total_interval_length(), 1);

        let ivals = IntervalSet::single(Interval::new(-2, 5));
        assert_eq!(ivals.into_inner(), vec![Interval::new(-2, 5)]);

        let ivals = set(&[(1, 3), (5, 15)]);
        assert_eq!(
            ivals.clone().into_inner(),
            ivals.iter().copied().collect::<Vec<_>>()
        );
    }

    #[test]
    fn insert() {
        let mut ivals = IntervalSet::new();
        ivals.insert(Interval::new(10, 11));
        assert_eq!(ivals, set(&[(10, 11)]));
        // insert again the same ival to make sure nothing changes
        ivals.insert(Interval::new(10, 11));
        assert_eq!(ivals, set(&[(10, 11)]));

        ivals.insert(Interval::new(1, 3));
        ivals.insert(Interval::new(9, 12));
        ivals.insert(Interval::new(30, 31));
        assert_eq!(ivals, set(&[(1, 3), (9, 12), (30, 31)]));

        // touching without sharing a bound does not merge
        ivals.insert(Interval::new(13, 15));
        assert_eq!(ivals, set(&[(1, 3), (9, 12), (13, 15), (30, 31)]));

        // bridging swallows everything it overlaps
        ivals.insert(Interval::new(8, 14));
        assert_eq!(ivals, set(&[(1, 3), (8, 15), (30, 31)]));
        ivals.insert(Interval::new(15, 30));
        assert_eq!(ivals, set(&[(1, 3), (8, 31)]));
        ivals.insert(Interval::new(5, 6));
        assert_eq!(ivals, set(&[(1, 3), (5, 6), (8, 31)]));
        ivals.insert(Interval::new(0, 100));
        assert_eq!(ivals, set(&[(0, 100)]));
        ivals.assert_normalized();

        let ivals: IntervalSet = [9, 1, 2, 1, 9].into_iter().map(Interval::point).collect();
        assert_eq!(ivals, set(&[(1, 1), (2, 2), (9, 9)]));
        ivals.assert_normalized();
    }

    #[test]
    fn normalize_chains() {
        let mut ivals = IntervalSet::from_intervals_unchecked([
            Interval::new(1, 8),
            Interval::new(7, 10),
            Interval::new(10, 12),
            Interval::new(13, 14),
        ]);
        ivals.normalize();
        assert_eq!(ivals, set(&[(1, 12), (13, 14)]));

        let mut empty = IntervalSet::new();
        empty.normalize();
        assert!(empty.is_empty());
    }

    #[test]
    fn display_and_debug() {
        let ivals = set(&[(1, 3), (5, 15)]);
        assert_eq!(ivals.to_string(), "[(1, 3), (5, 15)]");
        assert_eq!(format!("{ivals:?}"), "{1..=3, 5..=15}");
        assert_eq!(IntervalSet::new().to_string(), "[]");
    }

    #[quickcheck]
    fn qc_arbitrary_sets_are_normalized(ivals: IntervalSet) {
        ivals.assert_normalized();
    }

    #[quickcheck]
    fn qc_insert_matches_point_set(values: Vec<i8>) {
        let ivals: IntervalSet = values
            .iter()
            .map(|&v| Interval::point(i64::from(v)))
            .collect();
        ivals.assert_normalized();
        let expected: BTreeSet<i64> = values.into_iter().map(i64::from).collect();
        assert_eq!(ivals.values().collect::<BTreeSet<_>>(), expected);
        for v in i8::MIN..=i8::MAX {
            let v = i64::from(v);
            assert_eq!(ivals.contains(v), expected.contains(&v));
        }
    }

    #[quickcheck]
    fn qc_normalize_preserves_values(ivals: Vec<Interval>) {
        let raw = IntervalSet::from_intervals_unchecked(ivals.iter().copied());
        let expected: BTreeSet<i64> = raw.values().collect();
        let normalized = raw.normalized();
        normalized.assert_normalized();
        assert_eq!(normalized.values().collect::<BTreeSet<_>>(), expected);
    }
}
