//! JSON record and iCalendar exchange.

use chrono::TimeDelta;

use cadence_test::core::config::ExpansionLimits;
use cadence_test::fixtures::{add_rule, at, day, mondays_without_the_15th};
use cadence_test::rule::Rule;
use cadence_test::schedule::{Schedule, ScheduleError, ScheduleOptions};

#[test_log::test]
fn json_record_preserves_behaviour() {
    let schedule = mondays_without_the_15th();
    let json = schedule.to_json().expect("serialize");
    let restored = Schedule::from_json(&json, ExpansionLimits::default()).expect("deserialize");

    assert_eq!(
        restored.all_occurrences().expect("bounded"),
        schedule.all_occurrences().expect("bounded")
    );
    assert_eq!(restored.to_string(), schedule.to_string());
}

#[test]
fn handwritten_record_is_accepted() {
    let json = r#"{
        "start_date": "2024-01-01T09:00:00Z",
        "rrules": [{ "rule_type": "daily", "interval": 2, "count": 4 }],
        "exdates": ["2024-01-03T09:00:00Z"],
        "duration": 1800
    }"#;

    let schedule = Schedule::from_json(json, ExpansionLimits::default()).expect("valid record");

    assert_eq!(schedule.duration(), Some(TimeDelta::minutes(30)));
    assert_eq!(
        schedule.all_occurrences().expect("bounded"),
        vec![at(1, 1, 9), at(1, 5, 9), at(1, 7, 9)]
    );
}

#[test]
fn record_with_invalid_rule_is_rejected() {
    let json = r#"{
        "start_date": "2024-01-01T00:00:00Z",
        "rrules": [{ "rule_type": "weekly", "interval": 0 }]
    }"#;

    let err = Schedule::from_json(json, ExpansionLimits::default()).expect_err("interval 0");
    assert!(matches!(err, ScheduleError::CoreError(_)));
}

#[test]
fn ical_export_reimports_without_end_time() {
    let options = ScheduleOptions::default()
        .with_duration(TimeDelta::hours(1))
        .with_end_time(day(3, 1));
    let mut schedule = Schedule::new(at(1, 1, 9), options).expect("valid schedule");
    add_rule(&mut schedule, Rule::weekly().with_count(4));
    schedule.add_recurrence_date(at(1, 3, 9));

    let restored =
        Schedule::from_ical(&schedule.to_ical(), ExpansionLimits::default()).expect("reimport");

    assert_eq!(restored.end_time(), None);
    assert_eq!(restored.duration(), schedule.duration());
    assert_eq!(
        restored.all_occurrences().expect("bounded"),
        schedule.all_occurrences().expect("bounded")
    );
}

#[test]
fn limits_travel_with_the_loaded_schedule() {
    let limits = ExpansionLimits::new(2).expect("non-zero");
    let schedule = Schedule::from_ical("DTSTART:20240101T000000Z\r\nRRULE:FREQ=DAILY;COUNT=5", limits)
        .expect("valid ical");

    assert_eq!(schedule.limits(), limits);
    assert!(schedule.all_occurrences().is_err());
}
