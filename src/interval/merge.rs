// (c) Copyright 2025 Helsing GmbH. All rights reserved.
use super::IntervalSet;
use std::cmp::Ordering;
use tracing::debug;

/// Merges two normalized interval sets into one ordered set.
///
/// Both sets are walked with a cursor each. At every step the two current intervals are
/// compared:
///
/// - if the left one ends strictly before the right one starts, the left one is emitted and
///   only the left cursor advances;
/// - if the right one ends strictly before the left one starts, the right one is emitted and
///   only the right cursor advances;
/// - otherwise they overlap: their hull is emitted and both cursors advance.
///
/// Once either side runs out, the remainder of the other is copied over. If either input is
/// empty the other is returned as a copy.
///
/// An emitted interval is never looked at again. When a hull grows far enough to reach the
/// next interval of either side, that overlap survives into the output:
///
/// ```rust
/// use hailmerge::{IntervalSet, interval};
///
/// let left = IntervalSet::from_intervals([(1, 5), (7, 10)]).unwrap();
/// let right = IntervalSet::from_intervals([(4, 8)]).unwrap();
/// let merged = interval::merge(&left, &right);
/// assert_eq!(merged.intervals().collect::<Vec<_>>(), [(1, 8), (7, 10)]);
/// ```
///
/// Use [`union`] when the output must be normalized regardless of how intervals chain.
///
/// Inputs that are not normalized produce unspecified output, but never a panic.
#[must_use]
pub fn merge(left: &IntervalSet, right: &IntervalSet) -> IntervalSet {
    if left.is_empty() {
        return right.clone();
    }
    if right.is_empty() {
        return left.clone();
    }

    let mut ours = left.0.iter().peekable();
    let mut theirs = right.0.iter().peekable();
    let mut result = IntervalSet::with_capacity(left.len() + right.len());
    while let Some(&&o_ival) = ours.peek() {
        let Some(&&t_ival) = theirs.peek() else {
            // nothing left to compare against, the rest of `left` goes in as-is
            result.0.extend(ours.by_ref().copied());
            break;
        };
        match o_ival.partial_cmp(&t_ival) {
            Some(Ordering::Less) => {
                ours.next();
                result.0.push(o_ival);
            }
            Some(Ordering::Greater) => {
                theirs.next();
                result.0.push(t_ival);
            }
            // overlap
            Some(Ordering::Equal) | None => {
                ours.next();
                theirs.next();
                result.0.push(o_ival.hull(&t_ival));
            }
        }
    }
    result.0.extend(theirs.copied());

    debug!(
        left = left.len(),
        right = right.len(),
        merged = result.len(),
        "merged interval sets"
    );
    result
}

/// Merges two interval sets into a normalized set covering exactly the integers of both.
///
/// This is [`merge`] followed by [`IntervalSet::normalize`], which coalesces whatever chains of
/// overlapping intervals the single sweep left behind. It also tolerates inputs that are not
/// normalized.
#[must_use]
pub fn union(left: &IntervalSet, right: &IntervalSet) -> IntervalSet {
    let mut result = merge(left, right);
    let swept = result.len();
    result.normalize();
    debug!(
        swept,
        coalesced = swept - result.len(),
        "normalized merged interval sets"
    );
    result
}
