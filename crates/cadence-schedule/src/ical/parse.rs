//! Property parsing.
//!
//! Content lines are unfolded first (RFC 5545 §3.1). Date-time values may be
//! UTC (`Z` suffix), local to a `TZID` parameter, or floating; floating values
//! are read as UTC. `VALUE=DATE` and bare 8-digit dates mean midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use cadence_core::config::ExpansionLimits;
use cadence_rule::Rule;

use super::duration::parse_duration;
use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::{Schedule, ScheduleOptions};

/// A single unfolded content line split into name, parameters and value.
struct ContentLine<'a> {
    name: String,
    params: Vec<(String, &'a str)>,
    value: &'a str,
}

impl<'a> ContentLine<'a> {
    fn parse(line: &'a str) -> ScheduleResult<Self> {
        let (head, value) = line
            .split_once(':')
            .ok_or_else(|| ScheduleError::ParseError(format!("content line without ':': {line}")))?;

        let mut segments = head.split(';');
        let name = segments.next().unwrap_or_default().trim().to_ascii_uppercase();
        let params = segments
            .filter_map(|segment| segment.split_once('='))
            .map(|(key, val)| (key.trim().to_ascii_uppercase(), val.trim_matches('"')))
            .collect();

        Ok(Self {
            name,
            params,
            value: value.trim(),
        })
    }

    fn param(&self, key: &str) -> Option<&'a str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| *value)
    }

    /// Parses the value as a comma-separated list of instants.
    fn instants(&self) -> ScheduleResult<Vec<DateTime<Utc>>> {
        let date_only = self
            .param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"));
        let tzid = self.param("TZID");

        self.value
            .split(',')
            .map(|raw| parse_instant(raw.trim(), date_only, tzid))
            .collect()
    }

    fn instant(&self) -> ScheduleResult<DateTime<Utc>> {
        let mut instants = self.instants()?;
        match (instants.pop(), instants.is_empty()) {
            (Some(instant), true) => Ok(instant),
            _ => Err(ScheduleError::ParseError(format!(
                "{} takes a single value, got {}",
                self.name, self.value
            ))),
        }
    }
}

/// Joins folded continuation lines (a line break followed by a space or tab).
fn unfold(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        if let Some(continuation) = raw.strip_prefix([' ', '\t'])
            && let Some(last) = lines.last_mut()
        {
            last.push_str(continuation);
        } else if !raw.trim().is_empty() {
            lines.push(raw.to_string());
        }
    }
    lines
}

fn parse_instant(raw: &str, date_only: bool, tzid: Option<&str>) -> ScheduleResult<DateTime<Utc>> {
    let invalid = |detail: String| ScheduleError::ParseError(format!("invalid date-time {raw}: {detail}"));

    let naive = if date_only || !raw.contains('T') {
        NaiveDate::parse_from_str(raw, "%Y%m%d")
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|e| invalid(e.to_string()))?
    } else {
        NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y%m%dT%H%M%S")
            .map_err(|e| invalid(e.to_string()))?
    };

    if raw.ends_with('Z') {
        return Ok(naive.and_utc());
    }

    match tzid {
        Some(name) => {
            let tz: chrono_tz::Tz = name
                .parse()
                .map_err(|e| ScheduleError::ParseError(format!("unknown TZID {name}: {e}")))?;
            tz.from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| invalid(format!("does not exist in {name}")))
        }
        None => Ok(naive.and_utc()),
    }
}

impl Schedule {
    /// ## Summary
    /// Builds a schedule from iCalendar property lines.
    ///
    /// `DTSTART` is required. The duration comes from `DURATION` or from
    /// `DTEND - DTSTART`; giving both is an error.
    ///
    /// ## Errors
    /// Returns `ParseError` for malformed lines, values or a missing
    /// `DTSTART`, `RuleError` for a malformed rule, and the construction
    /// errors of [`Schedule::new`].
    #[tracing::instrument(skip_all)]
    pub fn from_ical(text: &str, limits: ExpansionLimits) -> ScheduleResult<Self> {
        let mut start = None;
        let mut end = None;
        let mut duration = None;
        let mut rrules = Vec::new();
        let mut exrules = Vec::new();
        let mut rdates = Vec::new();
        let mut exdates = Vec::new();

        for raw in unfold(text) {
            let line = ContentLine::parse(&raw)?;
            match line.name.as_str() {
                "DTSTART" => start = Some(line.instant()?),
                "DTEND" => end = Some(line.instant()?),
                "DURATION" => duration = Some(parse_duration(line.value)?),
                "RRULE" => rrules.push(line.value.parse::<Rule>()?),
                "EXRULE" => exrules.push(line.value.parse::<Rule>()?),
                "RDATE" => rdates.extend(line.instants()?),
                "EXDATE" => exdates.extend(line.instants()?),
                other => tracing::trace!(property = other, "Skipping property"),
            }
        }

        let start = start.ok_or_else(|| ScheduleError::ParseError("missing DTSTART".to_string()))?;
        let duration = match (duration, end) {
            (Some(_), Some(_)) => {
                return Err(ScheduleError::ParseError(
                    "DTEND and DURATION are mutually exclusive".to_string(),
                ));
            }
            (Some(duration), None) => Some(duration),
            (None, Some(end)) => Some(end.signed_duration_since(start)),
            (None, None) => None,
        };

        let mut options = ScheduleOptions::default().with_limits(limits);
        if let Some(duration) = duration {
            options = options.with_duration(duration);
        }

        let mut schedule = Self::new(start, options)?;
        for rule in rrules {
            schedule.add_recurrence_rule(rule)?;
        }
        for rule in exrules {
            schedule.add_exception_rule(rule)?;
        }
        for date in rdates {
            schedule.add_recurrence_date(date);
        }
        for date in exdates {
            schedule.add_exception_date(date);
        }

        tracing::debug!(%start, "Parsed schedule from iCalendar");
        Ok(schedule)
    }
}
