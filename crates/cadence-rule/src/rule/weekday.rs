//! Weekday selectors for the BYDAY rule part.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Returns the two-letter RRULE abbreviation of a weekday.
#[must_use]
pub const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

/// Parses a weekday from a two-letter abbreviation (case-insensitive).
#[must_use]
pub fn parse_weekday_code(s: &str) -> Option<Weekday> {
    Some(match s.to_ascii_uppercase().as_str() {
        "SU" => Weekday::Sun,
        "MO" => Weekday::Mon,
        "TU" => Weekday::Tue,
        "WE" => Weekday::Wed,
        "TH" => Weekday::Thu,
        "FR" => Weekday::Fri,
        "SA" => Weekday::Sat,
        _ => return None,
    })
}

/// Weekday with optional occurrence number.
///
/// Examples:
/// - `MO` - every Monday
/// - `1MO` - first Monday of the month/year
/// - `-1FR` - last Friday of the month/year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayNum {
    /// Optional occurrence number (-53 to 53, excluding 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i16>,
    /// The day of the week.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Creates a weekday occurrence without an ordinal.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// Creates a weekday occurrence with an ordinal.
    ///
    /// Returns `None` if `ordinal` is 0 or outside -53..=53.
    #[must_use]
    pub fn nth(ordinal: i16, weekday: Weekday) -> Option<Self> {
        (ordinal != 0 && (-53..=53).contains(&ordinal)).then_some(Self {
            ordinal: Some(ordinal),
            weekday,
        })
    }

    pub(crate) const fn to_rrule(self) -> rrule::NWeekday {
        match self.ordinal {
            Some(n) => rrule::NWeekday::Nth(n, self.weekday),
            None => rrule::NWeekday::Every(self.weekday),
        }
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", weekday_code(self.weekday))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_code_parse() {
        assert_eq!(parse_weekday_code("MO"), Some(Weekday::Mon));
        assert_eq!(parse_weekday_code("fr"), Some(Weekday::Fri));
        assert_eq!(parse_weekday_code("XX"), None);
    }

    #[test]
    fn nth_rejects_out_of_range() {
        assert!(WeekdayNum::nth(0, Weekday::Mon).is_none());
        assert!(WeekdayNum::nth(54, Weekday::Mon).is_none());
        assert!(WeekdayNum::nth(-1, Weekday::Fri).is_some());
    }

    #[test]
    fn display_with_ordinal() {
        let last_friday = WeekdayNum::nth(-1, Weekday::Fri).expect("valid ordinal");
        assert_eq!(last_friday.to_string(), "-1FR");
        assert_eq!(WeekdayNum::every(Weekday::Tue).to_string(), "TU");
    }
}
