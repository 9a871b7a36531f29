//! Worked examples of schedule behaviour.

use chrono::TimeDelta;

use cadence_test::core::error::CoreError;
use cadence_test::fixtures::{
    add_rule, at, daily_until_the_10th, day, mondays_without_the_15th, two_day_event_on_the_5th,
};
use cadence_test::rule::{Rule, WeekdayNum};
use cadence_test::schedule::{Schedule, ScheduleOptions};

#[test_log::test]
fn excluded_monday_is_skipped() {
    let schedule = mondays_without_the_15th();

    assert_eq!(
        schedule.all_occurrences().expect("bounded"),
        vec![day(1, 1), day(1, 8), day(1, 22), day(1, 29)]
    );
}

#[test_log::test]
fn end_time_clamps_unbounded_rule() {
    let schedule = daily_until_the_10th();
    let occurrences = schedule.occurrences(day(2, 1)).expect("clamped");

    assert_eq!(occurrences.len(), 10);
    assert_eq!(occurrences.first(), Some(&day(1, 1)));
    assert_eq!(occurrences.last(), Some(&day(1, 10)));
}

#[test_log::test]
fn duration_keeps_included_date_active() {
    let schedule = two_day_event_on_the_5th();

    assert!(schedule.occurring_at(day(1, 6)).expect("query"));
    assert!(!schedule.occurring_at(day(1, 8)).expect("query"));
}

#[test]
fn unbounded_schedule_is_refused() {
    let mut schedule = Schedule::starting(day(1, 1));
    add_rule(&mut schedule, Rule::hourly());

    let err = schedule.all_occurrences().expect_err("never ends");
    assert!(matches!(err.as_core(), Some(CoreError::UnboundedSchedule)));

    // Bounded queries still work on the same schedule.
    assert_eq!(schedule.occurrences(at(1, 1, 3)).expect("bounded").len(), 4);
    assert_eq!(schedule.next_occurrence(at(1, 1, 3)).expect("query"), Some(at(1, 1, 4)));
}

#[test]
fn exception_rule_takes_precedence_over_included_date() {
    let mut schedule = Schedule::starting(day(1, 1));
    add_rule(&mut schedule, Rule::daily().with_count(7));
    schedule
        .add_exception_rule(Rule::weekly().on_weekdays(&[chrono::Weekday::Wed]))
        .expect("valid rule");
    schedule.add_recurrence_date(day(1, 3));

    let occurrences = schedule.all_occurrences().expect("bounded");

    assert!(!occurrences.contains(&day(1, 3)));
    assert_eq!(occurrences.len(), 6);
}

#[test]
fn last_weekday_of_month_until() {
    let last_friday = WeekdayNum::nth(-1, chrono::Weekday::Fri).expect("valid ordinal");
    let mut schedule = Schedule::starting(at(1, 1, 17));
    add_rule(
        &mut schedule,
        Rule::monthly()
            .with_by_day(vec![last_friday])
            .with_until(at(4, 30, 0)),
    );

    assert_eq!(
        schedule.all_occurrences().expect("bounded"),
        vec![at(1, 26, 17), at(2, 23, 17), at(3, 29, 17), at(4, 26, 17)]
    );
}

#[test]
fn containment_and_membership_differ() {
    let options = ScheduleOptions::default().with_duration(TimeDelta::minutes(30));
    let mut schedule = Schedule::new(at(1, 1, 9), options).expect("valid schedule");
    add_rule(&mut schedule, Rule::daily().with_count(3));

    let mid_meeting = at(1, 2, 9) + TimeDelta::minutes(15);
    assert!(schedule.occurring_at(mid_meeting).expect("query"));
    assert!(!schedule.occurs_at(mid_meeting).expect("query"));
    assert!(schedule.occurs_at(at(1, 2, 9)).expect("query"));
}

#[test]
fn remaining_and_next_agree() {
    let schedule = mondays_without_the_15th();

    let remaining = schedule.remaining_occurrences(day(1, 9)).expect("bounded");
    assert_eq!(remaining, vec![day(1, 22), day(1, 29)]);
    assert_eq!(
        schedule.next_occurrences(5, day(1, 8)).expect("query"),
        remaining
    );
}
