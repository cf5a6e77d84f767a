use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};

/// The zone-aware timestamp type stored by every interval in this crate.
pub type Moment = DateTime<Local>;

/// Resolves a naive timestamp against the system's local zone.
///
/// Total over all inputs: an ambiguous local time (clocks rolled back)
/// resolves to the earliest of the two candidates, and a nonexistent local
/// time (clocks skipped ahead) is interpreted as UTC instead.
pub fn ensure_aware(value: NaiveDateTime) -> Moment {
    match Local.from_local_datetime(&value) {
        LocalResult::Single(moment) => moment,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Local.from_utc_datetime(&value),
    }
}

/// Conversion into a zone-aware [`Moment`].
///
/// Every timestamp entering an [`Interval`](crate::Interval) passes through
/// this trait before any comparison, so naive and aware inputs mix freely at
/// the API surface while the stored endpoints are always aware.
pub trait IntoAware {
    fn into_aware(self) -> Moment;
}

impl IntoAware for NaiveDateTime {
    fn into_aware(self) -> Moment {
        ensure_aware(self)
    }
}

impl<Tz: TimeZone> IntoAware for DateTime<Tz> {
    fn into_aware(self) -> Moment {
        self.with_timezone(&Local)
    }
}
