//! Proptest strategies producing small, overlapping schedules.
//!
//! Every generated instant is 09:00 UTC on a day offset from 2024-01-01,
//! shifted by a per-schedule sub-second fraction, so rules, included dates and
//! excluded dates collide often.

use chrono::{DateTime, TimeDelta, Utc};
use proptest::prelude::*;

use cadence_test::fixtures::at;
use cadence_test::rule::Rule;
use cadence_test::schedule::{Schedule, ScheduleOptions};

/// Days the generated instants are drawn from.
pub const HORIZON_DAYS: i64 = 60;

/// 09:00 UTC, `offset` days after 2024-01-01.
pub fn nine_am(offset: i64) -> DateTime<Utc> {
    at(1, 1, 9) + TimeDelta::days(offset)
}

/// Construction inputs for a generated schedule.
#[derive(Debug, Clone)]
pub struct ScheduleInputs {
    /// Milliseconds added to every instant of the schedule.
    pub millis: i64,
    pub anchor: i64,
    pub end: Option<i64>,
    pub rules: Vec<Rule>,
    pub exception_rules: Vec<Rule>,
    pub rdates: Vec<i64>,
    pub exdates: Vec<i64>,
}

impl ScheduleInputs {
    fn instant(&self, offset: i64) -> DateTime<Utc> {
        nine_am(offset) + TimeDelta::milliseconds(self.millis)
    }

    pub fn build(&self) -> Schedule {
        let mut options = ScheduleOptions::default();
        if let Some(end) = self.end {
            options = options.with_end_time(self.instant(self.anchor + end));
        }
        let mut schedule = Schedule::new(self.instant(self.anchor), options).expect("valid inputs");
        for rule in &self.rules {
            schedule.add_recurrence_rule(rule.clone()).expect("valid rule");
        }
        for rule in &self.exception_rules {
            schedule.add_exception_rule(rule.clone()).expect("valid rule");
        }
        for &offset in &self.rdates {
            schedule.add_recurrence_date(self.instant(offset));
        }
        for &offset in &self.exdates {
            schedule.add_exception_date(self.instant(offset));
        }
        schedule
    }
}

/// Daily or weekly rules with a small interval and a count.
pub fn bounded_rule() -> impl Strategy<Value = Rule> {
    (any::<bool>(), 1..4_u16, 1..20_u32).prop_map(|(daily, interval, count)| {
        let rule = if daily { Rule::daily() } else { Rule::weekly() };
        rule.with_interval(interval).with_count(count)
    })
}

/// Unbounded hourly rules that only line up with the daily grid now and then.
pub fn hourly_rule() -> impl Strategy<Value = Rule> {
    (5..30_u16).prop_map(|interval| Rule::hourly().with_interval(interval))
}

/// Exception rules: bounded daily or weekly ones, or unbounded hourly ones.
pub fn exception_rule() -> impl Strategy<Value = Rule> {
    prop_oneof![3 => bounded_rule(), 1 => hourly_rule()]
}

/// Whole seconds most of the time, otherwise a sub-second fraction.
pub fn millis() -> impl Strategy<Value = i64> {
    prop_oneof![2 => Just(0_i64), 1 => 1..1000_i64]
}

/// Schedules with bounded recurrence rules, so every query terminates.
pub fn schedule_inputs() -> impl Strategy<Value = ScheduleInputs> {
    (
        millis(),
        0..10_i64,
        proptest::option::of(0..HORIZON_DAYS),
        proptest::collection::vec(bounded_rule(), 0..3),
        proptest::collection::vec(exception_rule(), 0..2),
        proptest::collection::vec(0..HORIZON_DAYS, 0..6),
        proptest::collection::vec(0..HORIZON_DAYS, 0..6),
    )
        .prop_map(|(millis, anchor, end, rules, exception_rules, rdates, exdates)| ScheduleInputs {
            millis,
            anchor,
            end,
            rules,
            exception_rules,
            rdates,
            exdates,
        })
}

/// Same as [`schedule_inputs`] without exception rules or dates.
pub fn inclusive_schedule_inputs() -> impl Strategy<Value = ScheduleInputs> {
    schedule_inputs().prop_map(|inputs| ScheduleInputs {
        exception_rules: Vec::new(),
        exdates: Vec::new(),
        ..inputs
    })
}
