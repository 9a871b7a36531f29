//! RRULE text form of a [`Rule`] (`FREQ=WEEKLY;COUNT=5;BYDAY=MO`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{Frequency, Pattern, Rule, WeekdayNum, parse_weekday_code, weekday_code};
use crate::error::{RuleError, RuleResult};

/// UTC basic format used for UNTIL values.
pub const UTC_BASIC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

fn join_list<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = self.pattern();
        let mut parts = vec![format!("FREQ={}", self.frequency())];

        if pattern.interval != 1 {
            parts.push(format!("INTERVAL={}", pattern.interval));
        }

        if let Some(until) = pattern.until {
            parts.push(format!("UNTIL={}", until.format(UTC_BASIC_FORMAT)));
        }

        if let Some(count) = pattern.count {
            parts.push(format!("COUNT={count}"));
        }

        if let Some(week_start) = pattern.week_start {
            parts.push(format!("WKST={}", weekday_code(week_start)));
        }

        if !pattern.by_second.is_empty() {
            parts.push(format!("BYSECOND={}", join_list(&pattern.by_second)));
        }

        if !pattern.by_minute.is_empty() {
            parts.push(format!("BYMINUTE={}", join_list(&pattern.by_minute)));
        }

        if !pattern.by_hour.is_empty() {
            parts.push(format!("BYHOUR={}", join_list(&pattern.by_hour)));
        }

        if !pattern.by_day.is_empty() {
            parts.push(format!("BYDAY={}", join_list(&pattern.by_day)));
        }

        if !pattern.by_month_day.is_empty() {
            parts.push(format!("BYMONTHDAY={}", join_list(&pattern.by_month_day)));
        }

        if !pattern.by_year_day.is_empty() {
            parts.push(format!("BYYEARDAY={}", join_list(&pattern.by_year_day)));
        }

        if !pattern.by_week_no.is_empty() {
            parts.push(format!("BYWEEKNO={}", join_list(&pattern.by_week_no)));
        }

        if !pattern.by_month.is_empty() {
            parts.push(format!("BYMONTH={}", join_list(&pattern.by_month)));
        }

        if !pattern.by_set_pos.is_empty() {
            parts.push(format!("BYSETPOS={}", join_list(&pattern.by_set_pos)));
        }

        write!(f, "{}", parts.join(";"))
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    /// ## Summary
    /// Parses an RRULE value. An optional `RRULE:` prefix is accepted and
    /// unknown rule parts are ignored.
    ///
    /// ## Errors
    /// Returns `ParseError` for a missing or unknown FREQ, malformed parts, or
    /// a rule carrying both COUNT and UNTIL.
    fn from_str(s: &str) -> RuleResult<Self> {
        let body = s.trim();
        let body = body.strip_prefix("RRULE:").unwrap_or(body);

        let mut frequency = None;
        let mut pattern = Pattern::default();

        for part in body.split(';').filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| RuleError::ParseError(format!("rule part without '=': {part}")))?;

            if key.eq_ignore_ascii_case("FREQ") {
                frequency = Some(
                    Frequency::parse(value)
                        .ok_or_else(|| RuleError::ParseError(format!("unknown FREQ: {value}")))?,
                );
            } else {
                parse_rule_part(&mut pattern, key, value)?;
            }
        }

        let frequency =
            frequency.ok_or_else(|| RuleError::ParseError("missing FREQ".to_string()))?;
        Ok(Self::with_pattern(frequency, pattern))
    }
}

/// Parses a single non-FREQ key-value pair into the pattern.
fn parse_rule_part(pattern: &mut Pattern, key: &str, value: &str) -> RuleResult<()> {
    match key.to_ascii_uppercase().as_str() {
        "INTERVAL" => pattern.interval = parse_number(key, value)?,
        "COUNT" => {
            if pattern.until.is_some() {
                return Err(RuleError::ParseError(
                    "COUNT and UNTIL are mutually exclusive".to_string(),
                ));
            }
            pattern.count = Some(parse_number(key, value)?);
        }
        "UNTIL" => {
            if pattern.count.is_some() {
                return Err(RuleError::ParseError(
                    "COUNT and UNTIL are mutually exclusive".to_string(),
                ));
            }
            pattern.until = Some(parse_until(value)?);
        }
        "WKST" => {
            pattern.week_start = Some(
                parse_weekday_code(value)
                    .ok_or_else(|| RuleError::ParseError(format!("invalid WKST: {value}")))?,
            );
        }
        "BYSECOND" => pattern.by_second = parse_list(key, value)?,
        "BYMINUTE" => pattern.by_minute = parse_list(key, value)?,
        "BYHOUR" => pattern.by_hour = parse_list(key, value)?,
        "BYDAY" => {
            pattern.by_day = value
                .split(',')
                .map(|v| parse_weekday_num(v.trim()))
                .collect::<RuleResult<_>>()?;
        }
        "BYMONTHDAY" => pattern.by_month_day = parse_list(key, value)?,
        "BYYEARDAY" => pattern.by_year_day = parse_list(key, value)?,
        "BYWEEKNO" => pattern.by_week_no = parse_list(key, value)?,
        "BYMONTH" => pattern.by_month = parse_list(key, value)?,
        "BYSETPOS" => pattern.by_set_pos = parse_list(key, value)?,
        _ => tracing::trace!(key, "Ignoring unknown rule part"),
    }
    Ok(())
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> RuleResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_err| RuleError::ParseError(format!("invalid {key} value: {value}")))
}

fn parse_list<T: FromStr>(key: &str, value: &str) -> RuleResult<Vec<T>> {
    value.split(',').map(|v| parse_number(key, v)).collect()
}

/// Parses UNTIL as DATE-TIME (UTC or floating, both read as UTC) or DATE.
fn parse_until(value: &str) -> RuleResult<DateTime<Utc>> {
    let raw = value.trim();
    let naive = if raw.contains('T') {
        NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y%m%dT%H%M%S")
    } else {
        NaiveDate::parse_from_str(raw, "%Y%m%d").map(|d| d.and_time(NaiveTime::MIN))
    };

    naive
        .map(|n| n.and_utc())
        .map_err(|e| RuleError::ParseError(format!("invalid UNTIL {raw}: {e}")))
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
fn parse_weekday_num(s: &str) -> RuleResult<WeekdayNum> {
    let invalid = || RuleError::ParseError(format!("invalid BYDAY value: {s}"));

    if s.len() < 2 || !s.is_char_boundary(s.len() - 2) {
        return Err(invalid());
    }

    let (ordinal_str, weekday_str) = s.split_at(s.len() - 2);
    let weekday = parse_weekday_code(weekday_str).ok_or_else(invalid)?;

    if ordinal_str.is_empty() {
        return Ok(WeekdayNum::every(weekday));
    }

    let ordinal = ordinal_str
        .trim_start_matches('+')
        .parse::<i16>()
        .map_err(|_err| invalid())?;
    WeekdayNum::nth(ordinal, weekday).ok_or_else(invalid)
}
