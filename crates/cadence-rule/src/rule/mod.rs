//! Recurrence rule model (RFC 5545 §3.3.10).
//!
//! [`Rule`] is a closed set of variants, one per frequency. Each variant
//! carries the same [`Pattern`] of interval, termination and BYxxx parts; the
//! variant decides the base period the pattern repeats over.

mod describe;
mod frequency;
mod text;
mod weekday;

use chrono::{DateTime, Month, Utc, Weekday};
use serde::{Deserialize, Serialize};

use cadence_core::error::{CoreError, CoreResult};

pub use describe::DESCRIPTION_DATE_FORMAT;
pub use frequency::Frequency;
pub use text::UTC_BASIC_FORMAT;
pub use weekday::{WeekdayNum, parse_weekday_code, weekday_code};

/// Time zone every rule is expanded in.
pub(crate) const EXPANSION_TZ: rrule::Tz = rrule::Tz::Tz(chrono_tz::UTC);

/// Interval, termination and BYxxx parts shared by every rule variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    /// Number of base periods between repetitions (default: 1).
    pub interval: u16,

    /// Number of occurrences (mutually exclusive with until).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Last instant an occurrence may fall on, inclusive (mutually exclusive with count).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,

    /// Week start day (default: Monday).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<Weekday>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_second: Vec<u8>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_minute: Vec<u8>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_hour: Vec<u8>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_day: Vec<WeekdayNum>,

    /// Days of the month (-31 to 31, excluding 0).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_month_day: Vec<i8>,

    /// Days of the year (-366 to 366, excluding 0).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_year_day: Vec<i16>,

    /// ISO 8601 week numbers (-53 to 53, excluding 0).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_week_no: Vec<i8>,

    /// Months (1-12).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_month: Vec<u8>,

    /// Positions within the period's candidate set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_set_pos: Vec<i32>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            interval: 1,
            count: None,
            until: None,
            week_start: None,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
        }
    }
}

/// An immutable recurrence pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule_type", rename_all = "snake_case")]
pub enum Rule {
    Secondly(Pattern),
    Minutely(Pattern),
    Hourly(Pattern),
    Daily(Pattern),
    Weekly(Pattern),
    Monthly(Pattern),
    Yearly(Pattern),
}

impl Rule {
    /// Creates a rule of the given frequency with a default pattern.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self::with_pattern(frequency, Pattern::default())
    }

    /// Creates a rule of the given frequency around an existing pattern.
    #[must_use]
    pub const fn with_pattern(frequency: Frequency, pattern: Pattern) -> Self {
        match frequency {
            Frequency::Secondly => Self::Secondly(pattern),
            Frequency::Minutely => Self::Minutely(pattern),
            Frequency::Hourly => Self::Hourly(pattern),
            Frequency::Daily => Self::Daily(pattern),
            Frequency::Weekly => Self::Weekly(pattern),
            Frequency::Monthly => Self::Monthly(pattern),
            Frequency::Yearly => Self::Yearly(pattern),
        }
    }

    #[must_use]
    pub fn secondly() -> Self {
        Self::new(Frequency::Secondly)
    }

    #[must_use]
    pub fn minutely() -> Self {
        Self::new(Frequency::Minutely)
    }

    #[must_use]
    pub fn hourly() -> Self {
        Self::new(Frequency::Hourly)
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        match self {
            Self::Secondly(_) => Frequency::Secondly,
            Self::Minutely(_) => Frequency::Minutely,
            Self::Hourly(_) => Frequency::Hourly,
            Self::Daily(_) => Frequency::Daily,
            Self::Weekly(_) => Frequency::Weekly,
            Self::Monthly(_) => Frequency::Monthly,
            Self::Yearly(_) => Frequency::Yearly,
        }
    }

    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        match self {
            Self::Secondly(p)
            | Self::Minutely(p)
            | Self::Hourly(p)
            | Self::Daily(p)
            | Self::Weekly(p)
            | Self::Monthly(p)
            | Self::Yearly(p) => p,
        }
    }

    const fn pattern_mut(&mut self) -> &mut Pattern {
        match self {
            Self::Secondly(p)
            | Self::Minutely(p)
            | Self::Hourly(p)
            | Self::Daily(p)
            | Self::Weekly(p)
            | Self::Monthly(p)
            | Self::Yearly(p) => p,
        }
    }

    /// Returns whether the rule ends on its own (has a count or an until).
    #[must_use]
    pub const fn is_terminating(&self) -> bool {
        let pattern = self.pattern();
        pattern.count.is_some() || pattern.until.is_some()
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u16) -> Self {
        self.pattern_mut().interval = interval;
        self
    }

    /// Sets the count.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        let pattern = self.pattern_mut();
        pattern.count = Some(count);
        pattern.until = None; // Mutually exclusive
        self
    }

    /// Sets the until instant.
    #[must_use]
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        let pattern = self.pattern_mut();
        pattern.until = Some(until);
        pattern.count = None; // Mutually exclusive
        self
    }

    /// Sets the week start day.
    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.pattern_mut().week_start = Some(week_start);
        self
    }

    #[must_use]
    pub fn with_by_second(mut self, seconds: Vec<u8>) -> Self {
        self.pattern_mut().by_second = seconds;
        self
    }

    #[must_use]
    pub fn with_by_minute(mut self, minutes: Vec<u8>) -> Self {
        self.pattern_mut().by_minute = minutes;
        self
    }

    #[must_use]
    pub fn with_by_hour(mut self, hours: Vec<u8>) -> Self {
        self.pattern_mut().by_hour = hours;
        self
    }

    #[must_use]
    pub fn with_by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.pattern_mut().by_day = days;
        self
    }

    /// Shorthand for a BYDAY list without ordinals.
    #[must_use]
    pub fn on_weekdays(self, days: &[Weekday]) -> Self {
        self.with_by_day(days.iter().copied().map(WeekdayNum::every).collect())
    }

    #[must_use]
    pub fn with_by_month_day(mut self, days: Vec<i8>) -> Self {
        self.pattern_mut().by_month_day = days;
        self
    }

    #[must_use]
    pub fn with_by_year_day(mut self, days: Vec<i16>) -> Self {
        self.pattern_mut().by_year_day = days;
        self
    }

    #[must_use]
    pub fn with_by_week_no(mut self, weeks: Vec<i8>) -> Self {
        self.pattern_mut().by_week_no = weeks;
        self
    }

    #[must_use]
    pub fn with_by_month(mut self, months: Vec<u8>) -> Self {
        self.pattern_mut().by_month = months;
        self
    }

    #[must_use]
    pub fn with_by_set_pos(mut self, positions: Vec<i32>) -> Self {
        self.pattern_mut().by_set_pos = positions;
        self
    }

    /// ## Summary
    /// Translates the rule into an unvalidated `rrule` builder.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if a BYMONTH value is outside 1-12.
    pub(crate) fn to_rrule(&self) -> CoreResult<rrule::RRule<rrule::Unvalidated>> {
        let pattern = self.pattern();
        let mut rule = rrule::RRule::new(self.frequency().to_rrule()).interval(pattern.interval);

        if let Some(count) = pattern.count {
            rule = rule.count(count);
        }
        if let Some(until) = pattern.until {
            rule = rule.until(until.with_timezone(&EXPANSION_TZ));
        }
        if let Some(week_start) = pattern.week_start {
            rule = rule.week_start(week_start);
        }
        if !pattern.by_second.is_empty() {
            rule = rule.by_second(pattern.by_second.clone());
        }
        if !pattern.by_minute.is_empty() {
            rule = rule.by_minute(pattern.by_minute.clone());
        }
        if !pattern.by_hour.is_empty() {
            rule = rule.by_hour(pattern.by_hour.clone());
        }
        if !pattern.by_day.is_empty() {
            rule = rule.by_weekday(pattern.by_day.iter().copied().map(WeekdayNum::to_rrule).collect());
        }
        if !pattern.by_month_day.is_empty() {
            rule = rule.by_month_day(pattern.by_month_day.clone());
        }
        if !pattern.by_year_day.is_empty() {
            rule = rule.by_year_day(pattern.by_year_day.clone());
        }
        if !pattern.by_week_no.is_empty() {
            rule = rule.by_week_no(pattern.by_week_no.clone());
        }
        if !pattern.by_month.is_empty() {
            let months = pattern
                .by_month
                .iter()
                .map(|&m| {
                    Month::try_from(m)
                        .map_err(|e| CoreError::InvalidRule(format!("BYMONTH value {m}: {e}")))
                })
                .collect::<CoreResult<Vec<_>>>()?;
            rule = rule.by_month(&months);
        }
        if !pattern.by_set_pos.is_empty() {
            rule = rule.by_set_pos(pattern.by_set_pos.clone());
        }

        Ok(rule)
    }
}
