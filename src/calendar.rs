//! Builders turning calendar dates into time sets: whole-day ranges and
//! calendar months. These layer over the core constructors and carry no
//! interval arithmetic of their own.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::{Error, Result};
use crate::set::TimeSet;

/// Midnight at the start of `date`.
fn first_moment_in_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last representable instant of `date`, `23:59:59.999999`.
fn last_moment_in_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_micro_opt(23, 59, 59, 999_999)
        .expect("23:59:59.999999 is a valid time of day")
}

/// Builds a [`TimeSet`] spanning whole calendar days, from the first moment
/// of `start` through the last moment of `end`.
///
/// Fails with [`Error::StartAfterEnd`] when `end` precedes `start`.
///
/// # Examples
///
/// ```rust
/// # use timeset::calendar::date_range;
/// # use chrono::NaiveDate;
/// let start = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
/// let end = NaiveDate::from_ymd_opt(2021, 5, 21).unwrap();
///
/// let days = date_range(start, end)?;
/// assert!(days.contains(start.and_hms_opt(0, 0, 0).unwrap()));
/// assert!(days.contains(end.and_hms_opt(23, 59, 59).unwrap()));
/// # Ok::<(), timeset::Error>(())
/// ```
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<TimeSet> {
    TimeSet::between(first_moment_in_day(start), last_moment_in_day(end))
}

/// Builds a [`TimeSet`] spanning from the first moment of `start` through
/// the last moment of the date `days` days later.
///
/// `days = 0` covers `start` alone; negative `days` fails with
/// [`Error::StartAfterEnd`].
pub fn date_range_days(start: NaiveDate, days: i64) -> Result<TimeSet> {
    let end = start
        .checked_add_signed(TimeDelta::days(days))
        .ok_or(Error::InvalidArguments {
            reason: "day offset falls outside the supported calendar range",
        })?;
    date_range(start, end)
}

/// A calendar month, convertible into the [`TimeSet`] spanning it.
///
/// # Examples
///
/// ```rust
/// # use timeset::calendar::CalendarMonth;
/// let november = CalendarMonth::new(2021, 11)?;
/// assert_eq!(november.next(), CalendarMonth::new(2021, 12)?);
/// assert_eq!(november.prev(), CalendarMonth::new(2021, 10)?);
/// # Ok::<(), timeset::Error>(())
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

impl CalendarMonth {
    /// Creates the month for `(year, month)`, with `month` in `1..=12`.
    ///
    /// Fails with [`Error::InvalidArguments`] when the pair does not name a
    /// month the platform calendar can represent.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(first_day) => Ok(Self { first_day }),
            None => Err(Error::InvalidArguments {
                reason: "year/month does not name a representable calendar month",
            }),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year(), self.month(), day))
            .expect("every month has at least 28 days")
    }

    /// The following month.
    ///
    /// # Panics
    ///
    /// Panics if the adjacent month falls outside the range of dates chrono
    /// can represent.
    pub fn next(&self) -> Self {
        let first_day = self
            .last_day()
            .succ_opt()
            .expect("the following month starts the day after this one ends");
        Self { first_day }
    }

    /// The preceding month.
    ///
    /// # Panics
    ///
    /// Panics if the adjacent month falls outside the range of dates chrono
    /// can represent.
    pub fn prev(&self) -> Self {
        let last_day_of_prev = self
            .first_day
            .pred_opt()
            .expect("the preceding month ends the day before this one starts");
        Self {
            first_day: last_day_of_prev
                .with_day(1)
                .expect("day 1 is valid in every month"),
        }
    }

    /// The [`TimeSet`] covering the month, from the first moment of its
    /// first day through the last moment of its last day.
    pub fn time_set(&self) -> TimeSet {
        date_range(self.first_day(), self.last_day())
            .expect("a month's first day never follows its last day")
    }
}

impl From<CalendarMonth> for TimeSet {
    fn from(month: CalendarMonth) -> Self {
        month.time_set()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
