use std::fmt;
use std::ops::{BitAnd, BitOr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use chrono::{NaiveDate, TimeDelta};

use crate::aware::{IntoAware, Moment};
use crate::error::{Error, Result};
use crate::interval::Interval;

/// An arbitrary set of time: zero or more disjoint [`Interval`]s.
///
/// The member collection is always kept normalized — sorted by start, with
/// every pair of members separated by a non-empty gap — so structural
/// equality coincides with set equality. The empty set is a valid value
/// representing zero duration.
///
/// A `TimeSet` is never mutated after construction; [`union`](Self::union)
/// and [`intersection`](Self::intersection) return new sets.
///
/// # Examples
///
/// ```rust
/// # use timeset::TimeSet;
/// # use chrono::{NaiveDate, TimeDelta};
/// let day = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
/// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
///
/// let morning = TimeSet::between(at(9), at(12))?;
/// let evening = TimeSet::between(at(16), at(18))?;
///
/// let both = morning.union(&evening);
/// assert_eq!(both.iter().count(), 2);
/// assert_eq!(both.length(), TimeDelta::hours(5));
/// assert!(morning.intersection(&evening).is_empty());
/// # Ok::<(), timeset::Error>(())
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeSet {
    intervals: Vec<Interval>,
}

impl TimeSet {
    /// Creates the empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single-member set spanning `start` through `end`.
    ///
    /// Fails with [`Error::StartAfterEnd`] when `start > end`.
    pub fn between(start: impl IntoAware, end: impl IntoAware) -> Result<Self> {
        Ok(Interval::new(start, end)?.into())
    }

    /// Creates a single-member set spanning `duration` from `start`.
    ///
    /// A negative duration fails with [`Error::StartAfterEnd`].
    pub fn with_duration(start: impl IntoAware, duration: TimeDelta) -> Result<Self> {
        let start = start.into_aware();
        Self::between(start, start + duration)
    }

    /// Creates a set from optional parameters, for callers holding fields
    /// that may or may not be present.
    ///
    /// The valid combinations are: nothing (the empty set), `start` with
    /// `end`, or `start` with `duration`. Any other combination fails with
    /// [`Error::InvalidArguments`].
    pub fn from_parts(
        start: Option<Moment>,
        end: Option<Moment>,
        duration: Option<TimeDelta>,
    ) -> Result<Self> {
        match (start, end, duration) {
            (None, None, None) => Ok(Self::new()),
            (Some(start), Some(end), None) => Self::between(start, end),
            (Some(start), None, Some(duration)) => Self::with_duration(start, duration),
            _ => Err(Error::InvalidArguments {
                reason: "allowed combinations are: none, `start` with `end`, \
                         or `start` with `duration`",
            }),
        }
    }

    /// Returns `true` if the set covers no time at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates over the member intervals in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Returns `true` if any member interval contains `moment`.
    pub fn contains(&self, moment: impl IntoAware) -> bool {
        let moment = moment.into_aware();
        self.intervals
            .iter()
            .any(|interval| interval.contains_moment(moment))
    }

    /// Total duration of the set: the sum of its members' lengths.
    ///
    /// Members are disjoint, so no instant is counted twice.
    pub fn length(&self) -> TimeDelta {
        self.intervals
            .iter()
            .fold(TimeDelta::zero(), |total, interval| {
                total + interval.length()
            })
    }

    /// The earliest moment in the set, `None` when empty.
    pub fn start(&self) -> Option<Moment> {
        self.intervals.first().map(Interval::start)
    }

    /// The latest moment in the set, `None` when empty.
    pub fn end(&self) -> Option<Moment> {
        self.intervals.last().map(Interval::end)
    }

    /// The calendar date of the earliest moment, `None` when empty.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start().map(|moment| moment.date_naive())
    }

    /// The calendar date of the latest moment, `None` when empty.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end().map(|moment| moment.date_naive())
    }

    /// Computes the union of two sets.
    ///
    /// Members of both operands are re-normalized, so overlapping or
    /// touching intervals merge into maximal contiguous runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timeset::TimeSet;
    /// # use chrono::NaiveDate;
    /// let day = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
    /// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
    ///
    /// let a = TimeSet::between(at(12), at(14))?;
    /// let b = TimeSet::between(at(14), at(20))?;
    /// // Touching intervals merge into one contiguous member.
    /// assert_eq!(a.union(&b), TimeSet::between(at(12), at(20))?);
    /// # Ok::<(), timeset::Error>(())
    /// ```
    pub fn union(&self, other: &TimeSet) -> TimeSet {
        self.intervals
            .iter()
            .chain(other.intervals.iter())
            .copied()
            .collect()
    }

    /// Computes the intersection of two sets.
    ///
    /// Every member of `self` is intersected with every member of `other`;
    /// the surviving pieces form the result. Intersecting with the empty set
    /// yields the empty set.
    pub fn intersection(&self, other: &TimeSet) -> TimeSet {
        self.intervals
            .iter()
            .flat_map(|ours| {
                other
                    .intervals
                    .iter()
                    .filter_map(move |theirs| ours.intersection(theirs))
            })
            .collect()
    }
}

/// Sort-and-sweep normalization: order candidates by start, then merge each
/// into the previous run whenever they share an instant. Closed intervals
/// touching at an endpoint intersect, so touching runs merge as well.
fn normalize(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by_key(|interval| (interval.start(), interval.end()));
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for candidate in intervals {
        match merged.last_mut() {
            Some(last) if last.intersects(&candidate) => *last = last.hull(&candidate),
            _ => merged.push(candidate),
        }
    }
    merged
}

impl From<Interval> for TimeSet {
    fn from(interval: Interval) -> Self {
        Self {
            intervals: vec![interval],
        }
    }
}

impl FromIterator<Interval> for TimeSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self {
            intervals: normalize(iter.into_iter().collect()),
        }
    }
}

impl<'a> IntoIterator for &'a TimeSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitOr for &TimeSet {
    type Output = TimeSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for &TimeSet {
    type Output = TimeSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl fmt::Display for TimeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.intervals.is_empty() {
            return write!(f, "∅");
        }
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∪ ")?;
            }
            write!(f, "{interval}")?;
        }
        Ok(())
    }
}
