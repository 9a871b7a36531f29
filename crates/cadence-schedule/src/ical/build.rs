//! Property emission.

use chrono::{DateTime, Utc};

use cadence_rule::rule::UTC_BASIC_FORMAT;

use super::CRLF;
use crate::schedule::Schedule;

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(UTC_BASIC_FORMAT).to_string()
}

impl Schedule {
    /// Renders the schedule as iCalendar property lines joined with CRLF.
    ///
    /// The end time is not represented; see the [module docs](crate::ical).
    #[must_use]
    pub fn to_ical(&self) -> String {
        let mut lines = vec![format!("DTSTART:{}", format_instant(self.anchor()))];

        if let Some(end) = self.duration().and_then(|d| self.anchor().checked_add_signed(d)) {
            lines.push(format!("DTEND:{}", format_instant(end)));
        }

        lines.extend(self.recurrence_rules().map(|rule| format!("RRULE:{rule}")));
        lines.extend(self.exception_rules().map(|rule| format!("EXRULE:{rule}")));
        lines.extend(
            self.recurrence_dates()
                .iter()
                .map(|&date| format!("RDATE:{}", format_instant(date))),
        );
        lines.extend(
            self.exception_dates()
                .iter()
                .map(|&date| format!("EXDATE:{}", format_instant(date))),
        );

        lines.join(CRLF)
    }
}
