//! Calendar-day checks in zones other than UTC.

use chrono::NaiveDate;
use chrono_tz::{America, Asia};

use cadence_test::fixtures::{add_rule, at};
use cadence_test::rule::Rule;
use cadence_test::schedule::Schedule;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

#[test_log::test]
fn late_evening_utc_is_next_day_in_tokyo() {
    let mut schedule = Schedule::starting(at(1, 1, 20));
    add_rule(&mut schedule, Rule::daily().with_count(2));

    // 20:00 UTC on Jan 1 is 05:00 on Jan 2 in Tokyo.
    assert!(schedule.occurs_on(date(1, 1)).expect("query"));
    assert!(!schedule.occurs_on(date(1, 3)).expect("query"));
    assert!(schedule.occurs_on_in(date(1, 3), &Asia::Tokyo).expect("query"));
}

#[test]
fn short_dst_day_is_still_a_day() {
    // 2024-03-10 is 23 hours long in New York.
    let mut schedule = Schedule::starting(at(3, 10, 5));
    schedule.add_recurrence_date(at(3, 11, 3));

    assert!(schedule.occurs_on_in(date(3, 10), &America::New_York).expect("query"));
    assert!(!schedule.occurs_on_in(date(3, 11), &America::New_York).expect("query"));
}

#[test]
fn day_past_end_time_never_matches() {
    let options = cadence_test::schedule::ScheduleOptions::default().with_end_time(at(1, 2, 0));
    let mut schedule = Schedule::new(at(1, 1, 0), options).expect("valid schedule");
    add_rule(&mut schedule, Rule::daily());

    assert!(schedule.occurs_on(date(1, 2)).expect("query"));
    assert!(!schedule.occurs_on(date(1, 3)).expect("query"));
}
