//! DURATION values (RFC 5545 §3.3.6) as [`TimeDelta`].
//!
//! Only the week and day/time forms exist; there are no month or year
//! designators because those have no fixed length.

use chrono::TimeDelta;

use crate::error::{ScheduleError, ScheduleResult};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Formats a duration, e.g. `P1DT2H30M`, `P2W`, `PT0S`. Sub-second parts are
/// dropped.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let mut rest = total.unsigned_abs();

    if rest == 0 {
        return "PT0S".to_string();
    }

    let week = SECONDS_PER_WEEK.unsigned_abs();
    if rest % week == 0 {
        return format!("{sign}P{}W", rest / week);
    }

    let mut out = format!("{sign}P");
    let day = SECONDS_PER_DAY.unsigned_abs();
    if rest >= day {
        out.push_str(&format!("{}D", rest / day));
        rest %= day;
    }
    if rest > 0 {
        out.push('T');
        for (unit, designator) in [
            (SECONDS_PER_HOUR.unsigned_abs(), 'H'),
            (SECONDS_PER_MINUTE.unsigned_abs(), 'M'),
            (1, 'S'),
        ] {
            if rest >= unit {
                out.push_str(&format!("{}{designator}", rest / unit));
                rest %= unit;
            }
        }
    }
    out
}

/// ## Summary
/// Parses a DURATION value such as `P1W`, `-PT15M` or `P1DT12H`.
///
/// ## Errors
/// Returns `ParseError` for a missing `P`, an unknown designator, a
/// designator without a number, or a value that overflows.
pub fn parse_duration(value: &str) -> ScheduleResult<TimeDelta> {
    let invalid = || ScheduleError::ParseError(format!("invalid DURATION: {value}"));

    let raw = value.trim();
    let (negative, raw) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let body = raw.strip_prefix('P').ok_or_else(invalid)?;
    if body.is_empty() {
        return Err(invalid());
    }

    let mut total: i64 = 0;
    let mut digits = String::new();
    let mut in_time = false;
    let mut components = 0_usize;
    let mut time_components = 0_usize;

    for c in body.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c == 'T' {
            if in_time || !digits.is_empty() {
                return Err(invalid());
            }
            in_time = true;
            continue;
        }

        let unit = match (c, in_time) {
            ('W', false) => SECONDS_PER_WEEK,
            ('D', false) => SECONDS_PER_DAY,
            ('H', true) => SECONDS_PER_HOUR,
            ('M', true) => SECONDS_PER_MINUTE,
            ('S', true) => 1,
            _ => return Err(invalid()),
        };
        let amount: i64 = digits.parse().map_err(|_err| invalid())?;
        total = amount
            .checked_mul(unit)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(invalid)?;
        digits.clear();
        components += 1;
        if in_time {
            time_components += 1;
        }
    }

    if !digits.is_empty() || components == 0 || (in_time && time_components == 0) {
        return Err(invalid());
    }

    let total = if negative { -total } else { total };
    TimeDelta::try_seconds(total).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_common_durations() {
        assert_eq!(format_duration(TimeDelta::zero()), "PT0S");
        assert_eq!(format_duration(TimeDelta::weeks(2)), "P2W");
        assert_eq!(format_duration(TimeDelta::days(2)), "P2D");
        assert_eq!(format_duration(TimeDelta::minutes(90)), "PT1H30M");
        assert_eq!(
            format_duration(TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::seconds(5)),
            "P1DT2H5S"
        );
        assert_eq!(format_duration(-TimeDelta::minutes(15)), "-PT15M");
    }

    #[test]
    fn parses_week_and_day_time_forms() {
        assert_eq!(parse_duration("P1W").expect("weeks"), TimeDelta::weeks(1));
        assert_eq!(
            parse_duration("P1DT12H").expect("day and hours"),
            TimeDelta::hours(36)
        );
        assert_eq!(parse_duration("-PT15M").expect("negative"), -TimeDelta::minutes(15));
        assert_eq!(parse_duration("+PT30S").expect("signed"), TimeDelta::seconds(30));
    }

    #[test]
    fn format_then_parse_preserves_seconds() {
        let duration = TimeDelta::days(3) + TimeDelta::minutes(7);
        assert_eq!(parse_duration(&format_duration(duration)).expect("parse"), duration);
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "1D", "P", "PT", "P1DT", "P1H", "PT1D", "P1", "PXD", "P1DT2H3"] {
            assert!(parse_duration(value).is_err(), "accepted {value:?}");
        }
    }
}
