//! Immutable value types modeling sets of time: a single contiguous span
//! ([`Interval`]) and an arbitrary, possibly discontiguous set of time
//! ([`TimeSet`]) kept as a normalized collection of disjoint intervals.
//! Both support containment, union, intersection, and subset/superset
//! comparison; [`calendar`] adds builders for whole-day ranges and calendar
//! months on top of them.
//!
//! Timestamps are [`chrono`] values. Naive timestamps entering the library
//! are coerced to zone-aware form ([`Moment`]) against the local zone, so
//! every stored endpoint compares unambiguously.
//!
//! All types are immutable after construction: operations return new values,
//! and instances can be shared freely across threads.
//!
//! # Examples
//!
//! ```rust
//! use chrono::{NaiveDate, TimeDelta};
//! use timeset::TimeSet;
//!
//! let day = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
//! let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
//!
//! let work = TimeSet::between(at(9), at(17))?;
//! let meetings = TimeSet::between(at(10), at(11))?.union(&TimeSet::between(at(15), at(16))?);
//!
//! let in_meetings = work.intersection(&meetings);
//! assert_eq!(in_meetings.length(), TimeDelta::hours(2));
//! # Ok::<(), timeset::Error>(())
//! ```

/// Coercion of naive timestamps to zone-aware form.
pub mod aware;
/// Day-range and calendar-month builders over the core types.
pub mod calendar;
/// The error type for fallible constructors.
pub mod error;
/// The contiguous closed interval.
pub mod interval;
/// The normalized set of disjoint intervals.
pub mod set;

pub use aware::{ensure_aware, IntoAware, Moment};
pub use calendar::{date_range, date_range_days, CalendarMonth};
pub use error::{Error, Result};
pub use interval::Interval;
pub use set::TimeSet;
