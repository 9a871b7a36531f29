//! Human-readable phrasing of rules ("Every 2 weeks on Mondays 5 times").
//!
//! Best effort only: the output is meant for people and is not parsed back.

use chrono::{Month, Weekday};

use super::{Frequency, Rule, WeekdayNum};

/// Date format used in descriptions, e.g. "January 5, 2024".
pub const DESCRIPTION_DATE_FORMAT: &str = "%B %-d, %Y";

impl Rule {
    /// Returns a human-readable description of the rule.
    #[must_use]
    pub fn describe(&self) -> String {
        let pattern = self.pattern();
        let mut pieces = vec![base_phrase(self.frequency(), pattern.interval)];

        if !pattern.by_month.is_empty() {
            let months: Vec<String> = pattern
                .by_month
                .iter()
                .map(|&m| {
                    Month::try_from(m)
                        .map_or_else(|_err| format!("month {m}"), |month| month.name().to_string())
                })
                .collect();
            pieces.push(format!("in {}", sentence(&months)));
        }

        if !pattern.by_week_no.is_empty() {
            let weeks: Vec<String> = pattern.by_week_no.iter().map(|&w| ordinal(i32::from(w))).collect();
            pieces.push(format!("in the {} {} of the year", sentence(&weeks), plural("week", weeks.len())));
        }

        if !pattern.by_year_day.is_empty() {
            let days: Vec<String> = pattern.by_year_day.iter().map(|&d| ordinal(i32::from(d))).collect();
            pieces.push(format!("on the {} {} of the year", sentence(&days), plural("day", days.len())));
        }

        if !pattern.by_month_day.is_empty() {
            let days: Vec<String> = pattern.by_month_day.iter().map(|&d| ordinal(i32::from(d))).collect();
            pieces.push(format!("on the {} {} of the month", sentence(&days), plural("day", days.len())));
        }

        if !pattern.by_day.is_empty() {
            let days: Vec<String> = pattern.by_day.iter().map(describe_weekday_num).collect();
            pieces.push(format!("on {}", sentence(&days)));
        }

        for (values, unit, period) in [
            (&pattern.by_hour, "hour", "day"),
            (&pattern.by_minute, "minute", "hour"),
            (&pattern.by_second, "second", "minute"),
        ] {
            if !values.is_empty() {
                let list: Vec<String> = values.iter().map(|&v| ordinal(i32::from(v))).collect();
                pieces.push(format!("on the {} {} of the {period}", sentence(&list), plural(unit, list.len())));
            }
        }

        if !pattern.by_set_pos.is_empty() {
            let positions: Vec<String> = pattern.by_set_pos.iter().map(|&p| ordinal(p)).collect();
            pieces.push(format!("limited to the {} match", sentence(&positions)));
        }

        if let Some(count) = pattern.count {
            pieces.push(if count == 1 { "once".to_string() } else { format!("{count} times") });
        }

        if let Some(until) = pattern.until {
            pieces.push(format!("until {}", until.format(DESCRIPTION_DATE_FORMAT)));
        }

        pieces.join(" ")
    }
}

fn base_phrase(frequency: Frequency, interval: u16) -> String {
    if interval > 1 {
        return format!("Every {interval} {}s", frequency.unit());
    }
    match frequency {
        Frequency::Secondly => "Every second".to_string(),
        Frequency::Minutely => "Every minute".to_string(),
        Frequency::Hourly => "Hourly".to_string(),
        Frequency::Daily => "Daily".to_string(),
        Frequency::Weekly => "Weekly".to_string(),
        Frequency::Monthly => "Monthly".to_string(),
        Frequency::Yearly => "Yearly".to_string(),
    }
}

fn describe_weekday_num(day: &WeekdayNum) -> String {
    let name = weekday_name(day.weekday);
    match day.ordinal {
        None => format!("{name}s"),
        Some(n) => format!("the {} {name}", ordinal(i32::from(n))),
    }
}

const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn plural(word: &str, count: usize) -> String {
    if count == 1 { word.to_string() } else { format!("{word}s") }
}

/// English ordinal; negative values count from the end ("last", "2nd to last").
fn ordinal(n: i32) -> String {
    match n {
        -1 => "last".to_string(),
        n if n < 0 => format!("{} to last", ordinal(n.saturating_neg())),
        n => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}

/// Joins words as an English list: "a", "a and b", "a, b, and c".
fn sentence(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
