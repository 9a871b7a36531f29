//! iCalendar (RFC 5545) property form of a schedule.
//!
//! [`Schedule::to_ical`](crate::Schedule::to_ical) emits `DTSTART`, `DTEND`,
//! `RRULE`, `EXRULE`, `RDATE` and `EXDATE` lines. The schedule's end time has
//! no property of its own and is not emitted, so exporting a schedule with an
//! end time is lossy. iCalendar date-times have whole-second precision, so a
//! sub-second part of any instant is dropped as well.
//!
//! [`Schedule::from_ical`](crate::Schedule::from_ical) reads the same
//! properties back, plus `DURATION` as an alternative to `DTEND`. Other
//! properties, such as `SUMMARY` or `BEGIN:VEVENT`, are skipped.

mod build;
mod duration;
mod parse;

pub use duration::{format_duration, parse_duration};

/// Line separator between properties.
pub const CRLF: &str = "\r\n";
