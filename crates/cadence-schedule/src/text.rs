//! Human-readable rendering of a schedule.
//!
//! Included dates come first, then recurrence rules, exception rules,
//! excluded dates and the end time, joined with `" / "`. An included date
//! that is also excluded is not listed.

use std::collections::BTreeSet;
use std::fmt;

use cadence_rule::rule::DESCRIPTION_DATE_FORMAT;

use crate::schedule::Schedule;

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let excluded: BTreeSet<_> = self.exception_dates().iter().copied().collect();
        let included: BTreeSet<_> = self
            .recurrence_dates()
            .iter()
            .copied()
            .filter(|date| !excluded.contains(date))
            .collect();

        let mut parts: Vec<String> = included
            .iter()
            .map(|date| date.format(DESCRIPTION_DATE_FORMAT).to_string())
            .collect();

        parts.extend(self.recurrence_rules().map(cadence_rule::Rule::describe));
        parts.extend(
            self.exception_rules()
                .map(|rule| format!("not {}", lowercase_first(&rule.describe()))),
        );
        parts.extend(
            excluded
                .iter()
                .map(|date| format!("not on {}", date.format(DESCRIPTION_DATE_FORMAT))),
        );

        if let Some(end_time) = self.end_time() {
            parts.push(format!("until {}", end_time.format(DESCRIPTION_DATE_FORMAT)));
        }

        write!(f, "{}", parts.join(" / "))
    }
}

/// Lowercases the leading character so a rule phrase reads mid-sentence.
fn lowercase_first(phrase: &str) -> String {
    let mut chars = phrase.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc, Weekday};

    use cadence_rule::Rule;

    use crate::schedule::ScheduleOptions;

    use super::*;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn empty_schedule_renders_empty() {
        assert_eq!(Schedule::starting(at(1, 1)).to_string(), "");
    }

    #[test]
    fn dates_are_sorted_and_deduplicated() {
        let mut schedule = Schedule::starting(at(1, 1));
        schedule.add_recurrence_date(at(3, 2));
        schedule.add_recurrence_date(at(1, 5));
        schedule.add_recurrence_date(at(3, 2));

        assert_eq!(schedule.to_string(), "January 5, 2024 / March 2, 2024");
    }

    #[test]
    fn excluded_dates_replace_included_ones() {
        let mut schedule = Schedule::starting(at(1, 1));
        schedule.add_recurrence_date(at(1, 5));
        schedule.add_recurrence_date(at(1, 6));
        schedule.add_exception_date(at(1, 5));

        assert_eq!(
            schedule.to_string(),
            "January 6, 2024 / not on January 5, 2024"
        );
    }

    #[test_log::test]
    fn rules_and_end_time_are_described() {
        let options = ScheduleOptions::default().with_end_time(at(6, 30));
        let mut schedule = Schedule::new(at(1, 1), options).expect("valid schedule");
        schedule
            .add_recurrence_rule(Rule::weekly().on_weekdays(&[Weekday::Mon]))
            .expect("valid rule");
        schedule
            .add_exception_rule(Rule::monthly().with_by_month_day(vec![1]))
            .expect("valid rule");

        let text = schedule.to_string();
        let parts: Vec<&str> = text.split(" / ").collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], Rule::weekly().on_weekdays(&[Weekday::Mon]).describe());
        assert_eq!(parts[1], "not monthly on the 1st day of the month");
        assert_eq!(parts[2], "until June 30, 2024");
    }
}
