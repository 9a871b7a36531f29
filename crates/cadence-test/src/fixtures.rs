//! Instant builders and canned schedules.

use chrono::{DateTime, TimeDelta, TimeZone, Utc, Weekday};

use cadence_rule::Rule;
use cadence_schedule::{Schedule, ScheduleOptions};

/// Midnight UTC on the given 2024 date.
///
/// # Panics
/// Panics if the date does not exist.
#[must_use]
pub fn day(month: u32, day: u32) -> DateTime<Utc> {
    at(month, day, 0)
}

/// The given hour UTC on the given 2024 date.
///
/// # Panics
/// Panics if the date or hour does not exist.
#[must_use]
pub fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture instant 2024-{month:02}-{day:02} {hour:02}:00"))
}

/// Weekly on Mondays, five times from 2024-01-01, with 2024-01-15 excluded.
///
/// # Panics
/// Panics if the fixture rule is rejected.
#[must_use]
pub fn mondays_without_the_15th() -> Schedule {
    let mut schedule = Schedule::starting(day(1, 1));
    add_rule(
        &mut schedule,
        Rule::weekly().with_count(5).on_weekdays(&[Weekday::Mon]),
    );
    schedule.add_exception_date(day(1, 15));
    schedule
}

/// Daily with no count or until, capped by an end time of 2024-01-10.
///
/// # Panics
/// Panics if the fixture is rejected.
#[must_use]
pub fn daily_until_the_10th() -> Schedule {
    let options = ScheduleOptions::default().with_end_time(day(1, 10));
    let mut schedule = Schedule::new(day(1, 1), options)
        .unwrap_or_else(|e| panic!("fixture schedule rejected: {e}"));
    add_rule(&mut schedule, Rule::daily());
    schedule
}

/// A single included date on 2024-01-05 lasting two days.
///
/// # Panics
/// Panics if the fixture is rejected.
#[must_use]
pub fn two_day_event_on_the_5th() -> Schedule {
    let options = ScheduleOptions::default().with_duration(TimeDelta::days(2));
    let mut schedule = Schedule::new(day(1, 1), options)
        .unwrap_or_else(|e| panic!("fixture schedule rejected: {e}"));
    schedule.add_recurrence_date(day(1, 5));
    schedule
}

/// Attaches a recurrence rule that fixtures know to be valid.
///
/// # Panics
/// Panics if the rule is rejected.
pub fn add_rule(schedule: &mut Schedule, rule: Rule) {
    schedule
        .add_recurrence_rule(rule)
        .unwrap_or_else(|e| panic!("fixture rule rejected: {e}"));
}
