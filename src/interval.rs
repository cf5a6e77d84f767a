use std::cmp::{max, min};
use std::fmt;
use std::ops::{BitAnd, BitOr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use chrono::TimeDelta;

use crate::aware::{IntoAware, Moment};
use crate::error::{Error, Result};

/// A contiguous span of time, closed on both ends: `[start, end]`.
///
/// Both endpoints are coerced to zone-aware form on construction, and the
/// invariant `start <= end` always holds. An interval is immutable; every
/// operation returns a new value. A single instant (`start == end`) is a
/// valid interval of zero length.
///
/// # Examples
///
/// ```rust
/// # use timeset::Interval;
/// # use chrono::{NaiveDate, TimeDelta};
/// let day = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
/// let noon = day.and_hms_opt(12, 0, 0).unwrap();
/// let two = day.and_hms_opt(14, 0, 0).unwrap();
///
/// let lunch = Interval::new(noon, two)?;
/// assert!(lunch.contains(day.and_hms_opt(13, 30, 0).unwrap()));
/// assert_eq!(lunch.length(), TimeDelta::hours(2));
/// # Ok::<(), timeset::Error>(())
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Moment,
    end: Moment,
}

impl Interval {
    /// Creates a new `Interval` from two timestamps, naive or aware.
    ///
    /// Naive inputs are resolved against the local zone before the ordering
    /// check. Fails with [`Error::StartAfterEnd`] when `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timeset::Interval;
    /// # use chrono::NaiveDate;
    /// let day = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
    /// let noon = day.and_hms_opt(12, 0, 0).unwrap();
    /// let two = day.and_hms_opt(14, 0, 0).unwrap();
    ///
    /// assert!(Interval::new(noon, two).is_ok());
    /// assert!(Interval::new(two, noon).is_err());
    /// ```
    pub fn new(start: impl IntoAware, end: impl IntoAware) -> Result<Self> {
        let start = start.into_aware();
        let end = end.into_aware();
        if start > end {
            return Err(Error::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the degenerate interval holding exactly one instant.
    pub fn instant(moment: impl IntoAware) -> Self {
        let moment = moment.into_aware();
        Self {
            start: moment,
            end: moment,
        }
    }

    /// The inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> Moment {
        self.start
    }

    /// The inclusive end of the interval.
    #[inline]
    pub fn end(&self) -> Moment {
        self.end
    }

    /// Returns `true` if the interval covers a single instant.
    #[inline]
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// The duration covered by the interval, zero for an instant.
    #[inline]
    pub fn length(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns `true` if `moment` falls within the interval.
    ///
    /// Both endpoints are included.
    pub fn contains(&self, moment: impl IntoAware) -> bool {
        self.contains_moment(moment.into_aware())
    }

    #[inline]
    pub(crate) fn contains_moment(&self, moment: Moment) -> bool {
        self.start <= moment && moment <= self.end
    }

    /// Returns `true` if the two intervals share at least one instant.
    ///
    /// Covers every overlap topology: partial overlap from either side,
    /// touching at one endpoint, full containment either way, and exact
    /// equality. False only when the intervals are strictly disjoint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use timeset::Interval;
    /// # use chrono::NaiveDate;
    /// let day = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
    /// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
    ///
    /// let morning = Interval::new(at(9), at(12))?;
    /// assert!(morning.intersects(&Interval::new(at(11), at(14))?)); // overlap
    /// assert!(morning.intersects(&Interval::new(at(12), at(14))?)); // touching
    /// assert!(!morning.intersects(&Interval::new(at(13), at(14))?)); // gap
    /// # Ok::<(), timeset::Error>(())
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.contains_moment(other.start)
            || self.contains_moment(other.end)
            || self.is_subset_of(other)
    }

    /// Computes the intersection of two intervals.
    ///
    /// Returns `None` when they are strictly disjoint. Intervals touching at
    /// one endpoint intersect in a single instant.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self {
            start: max(self.start, other.start),
            end: min(self.end, other.end),
        })
    }

    /// Computes the union of two intervals, when it is itself contiguous.
    ///
    /// Returns `None` when the intervals are strictly disjoint; only a
    /// [`TimeSet`](crate::TimeSet) can represent that union.
    pub fn union(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(self.hull(other))
    }

    /// Returns `true` if `self` covers every instant of `other`.
    #[inline]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` if every instant of `self` is covered by `other`.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        other.is_superset_of(self)
    }

    // Smallest interval covering both operands, regardless of any gap
    // between them. Always ordered, so no invariant check is needed.
    pub(crate) fn hull(&self, other: &Self) -> Self {
        Self {
            start: min(self.start, other.start),
            end: max(self.end, other.end),
        }
    }
}

impl BitAnd for Interval {
    type Output = Option<Interval>;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl BitOr for Interval {
    type Output = Option<Interval>;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aware::ensure_aware;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 5, 20)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn iv(start: NaiveDateTime, end: NaiveDateTime) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn construction_orders_endpoints() {
        let interval = iv(at(12, 12), at(14, 12));
        assert_eq!(interval.start(), ensure_aware(at(12, 12)));
        assert_eq!(interval.end(), ensure_aware(at(14, 12)));
    }

    #[test]
    fn construction_rejects_reversed_endpoints() {
        let err = Interval::new(at(14, 12), at(12, 12)).unwrap_err();
        assert_eq!(
            err,
            Error::StartAfterEnd {
                start: ensure_aware(at(14, 12)),
                end: ensure_aware(at(12, 12)),
            }
        );
    }

    #[test]
    fn endpoints_are_contained() {
        let interval = iv(at(12, 12), at(14, 12));
        assert!(interval.contains(at(12, 12)));
        assert!(interval.contains(at(13, 12)));
        assert!(interval.contains(at(14, 12)));
    }

    #[test]
    fn moments_outside_are_not_contained() {
        let interval = iv(at(12, 12), at(14, 12));
        assert!(!interval.contains(at(11, 0)));
        assert!(!interval.contains(at(22, 12)));
    }

    #[test]
    fn length_of_instant_is_zero() {
        let instant = Interval::instant(at(12, 12));
        assert!(instant.is_instant());
        assert_eq!(instant.length(), TimeDelta::zero());
    }

    #[test]
    fn length_is_end_minus_start() {
        assert_eq!(iv(at(12, 12), at(14, 12)).length(), TimeDelta::hours(2));
    }

    #[test]
    fn intersects_covers_all_topologies() {
        let base = iv(at(12, 0), at(14, 0));

        // Partial overlap from either side.
        assert!(base.intersects(&iv(at(13, 0), at(15, 0))));
        assert!(base.intersects(&iv(at(11, 0), at(13, 0))));
        // Containment either way.
        assert!(base.intersects(&iv(at(12, 30), at(13, 30))));
        assert!(base.intersects(&iv(at(11, 0), at(15, 0))));
        // Touching at one endpoint.
        assert!(base.intersects(&iv(at(14, 0), at(20, 0))));
        assert!(base.intersects(&iv(at(10, 0), at(12, 0))));
        // Exact equality.
        assert!(base.intersects(&base));
        // Strictly disjoint.
        assert!(!base.intersects(&iv(at(15, 0), at(16, 0))));
        assert!(!base.intersects(&iv(at(10, 0), at(11, 0))));
    }

    #[test]
    fn intersects_is_symmetric() {
        let base = iv(at(12, 0), at(14, 0));
        let cases = [
            iv(at(13, 0), at(15, 0)),
            iv(at(11, 0), at(13, 0)),
            iv(at(12, 30), at(13, 30)),
            iv(at(11, 0), at(15, 0)),
            iv(at(14, 0), at(20, 0)),
            iv(at(15, 0), at(16, 0)),
            Interval::instant(at(13, 0)),
        ];
        for other in cases {
            assert_eq!(base.intersects(&other), other.intersects(&base));
        }
    }

    #[test]
    fn intersection_of_overlap() {
        let a = iv(at(12, 12), at(14, 12));
        let b = iv(at(13, 12), at(22, 12));
        assert_eq!(a.intersection(&b), Some(iv(at(13, 12), at(14, 12))));
    }

    #[test]
    fn intersection_with_instant() {
        let a = iv(at(12, 12), at(14, 12));
        let point = Interval::instant(at(12, 12));
        assert_eq!(a.intersection(&point), Some(point));
    }

    #[test]
    fn intersection_of_disjoint_is_none() {
        let a = iv(at(12, 0), at(14, 0));
        let b = iv(at(16, 0), at(18, 0));
        assert_eq!(a.intersection(&b), None);
        assert_eq!(a & b, None);
    }

    #[test]
    fn union_of_overlap() {
        let a = iv(at(12, 12), at(14, 12));
        let b = iv(at(13, 12), at(22, 12));
        assert_eq!(a.union(&b), Some(iv(at(12, 12), at(22, 12))));
        assert_eq!(a | b, Some(iv(at(12, 12), at(22, 12))));
    }

    #[test]
    fn union_with_contained_instant() {
        let a = iv(at(12, 12), at(14, 12));
        assert_eq!(a.union(&Interval::instant(at(12, 12))), Some(a));
    }

    #[test]
    fn union_of_touching_merges() {
        let a = iv(at(12, 0), at(14, 0));
        let b = iv(at(14, 0), at(20, 0));
        assert_eq!(a.union(&b), Some(iv(at(12, 0), at(20, 0))));
    }

    #[test]
    fn union_of_disjoint_is_none() {
        let a = iv(at(12, 0), at(14, 0));
        let b = iv(at(16, 0), at(18, 0));
        assert_eq!(a.union(&b), None);
    }

    #[test]
    fn subset_and_superset() {
        let outer = iv(at(11, 0), at(15, 0));
        let inner = iv(at(12, 0), at(14, 0));

        assert!(outer.is_superset_of(&inner));
        assert!(inner.is_subset_of(&outer));
        assert!(!inner.is_superset_of(&outer));
        // Every interval is a subset and superset of itself.
        assert!(outer.is_superset_of(&outer));
        assert!(outer.is_subset_of(&outer));
    }

    #[test]
    fn structural_equality() {
        assert_eq!(iv(at(12, 0), at(14, 0)), iv(at(12, 0), at(14, 0)));
        assert_ne!(iv(at(12, 0), at(14, 0)), iv(at(12, 0), at(15, 0)));
    }

    #[test]
    fn display_renders_closed_brackets() {
        let rendered = format!("{}", iv(at(12, 0), at(14, 0)));
        assert!(rendered.starts_with('['));
        assert!(rendered.ends_with(']'));
        assert!(rendered.contains(", "));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let interval = iv(at(12, 12), at(14, 12));
        let json = serde_json::to_string(&interval).unwrap();
        let back: Interval = serde_json::from_str(&json).unwrap();
        assert_eq!(interval, back);
    }
}
