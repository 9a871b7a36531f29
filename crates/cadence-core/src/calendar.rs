//! Calendar-day boundaries for day-granular queries.
//!
//! A schedule works on UTC instants. Questions like "does it occur on
//! 2024-03-10?" need a reference frame that says where that day starts and
//! ends; [`DayBoundary`] supplies it.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

/// Maps a calendar day to the UTC instants that bound it.
pub trait DayBoundary {
    /// First instant of `day`, or `None` if it is not representable.
    fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>>;

    /// Last whole second of `day`, or `None` if it is not representable.
    fn end_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        let next = self.start_of_day(day.succ_opt()?)?;
        Some(next - TimeDelta::seconds(1))
    }
}

impl DayBoundary for Utc {
    fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        Some(day.and_time(NaiveTime::MIN).and_utc())
    }
}

impl DayBoundary for chrono_tz::Tz {
    /// Local midnight, or the first valid local instant after it when a DST
    /// transition skips midnight.
    fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = day.and_time(NaiveTime::MIN);
        self.from_local_datetime(&midnight)
            .earliest()
            .or_else(|| {
                (1..=96).find_map(|quarter| {
                    self.from_local_datetime(&(midnight + TimeDelta::minutes(15 * quarter)))
                        .earliest()
                })
            })
            .map(|dt| dt.with_timezone(&Utc))
    }
}
