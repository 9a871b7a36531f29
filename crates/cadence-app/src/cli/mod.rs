//! Argument parsing and command execution for the `cadence` binary.
//!
//! ```text
//! cadence <schedule.json|schedule.ics> <command> [args]
//! ```
//!
//! Instants are RFC 3339 (`2024-01-01T09:00:00Z`); days are `YYYY-MM-DD`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};

use cadence_core::config::ExpansionLimits;
use cadence_schedule::Schedule;

pub const USAGE: &str = "usage: cadence <schedule.json|schedule.ics> <command> [args]

commands:
  all                      every occurrence (terminating schedules only)
  first <n>                the first n occurrences
  upto <end>               occurrences at or before end
  between <begin> <end>    occurrences in [begin, end]
  next <from> [n]          up to n occurrences after from (default 1)
  remaining <from>         occurrences at or after from
  occurring <time>         whether an occurrence is in progress at time
  at <time>                whether time is itself an occurrence
  on <day>                 whether an occurrence falls on day (UTC)
  describe                 human-readable summary
  ical                     iCalendar property lines
  json                     JSON record";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    All,
    First(usize),
    Upto(DateTime<Utc>),
    Between(DateTime<Utc>, DateTime<Utc>),
    Next(DateTime<Utc>, usize),
    Remaining(DateTime<Utc>),
    Occurring(DateTime<Utc>),
    At(DateTime<Utc>),
    On(NaiveDate),
    Describe,
    Ical,
    Json,
}

/// A schedule file and the command to run against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub path: PathBuf,
    pub command: Command,
}

fn instant(arg: Option<&str>, name: &str) -> Result<DateTime<Utc>> {
    let raw = arg.with_context(|| format!("missing <{name}>"))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid <{name}> {raw:?}, expected RFC 3339"))
}

fn count(arg: Option<&str>, name: &str) -> Result<usize> {
    let raw = arg.with_context(|| format!("missing <{name}>"))?;
    raw.parse()
        .with_context(|| format!("invalid <{name}> {raw:?}, expected a count"))
}

/// ## Summary
/// Parses the arguments following the program name.
///
/// ## Errors
/// Returns an error describing the first missing or malformed argument.
pub fn parse_args<I, S>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|arg| arg.as_ref().to_owned()).collect();
    let mut args = args.iter().map(String::as_str);

    let path = PathBuf::from(args.next().context("missing schedule file")?);
    let name = args.next().context("missing command")?;

    let command = match name {
        "all" => Command::All,
        "first" => Command::First(count(args.next(), "n")?),
        "upto" => Command::Upto(instant(args.next(), "end")?),
        "between" => Command::Between(instant(args.next(), "begin")?, instant(args.next(), "end")?),
        "next" => {
            let from = instant(args.next(), "from")?;
            let n = args.next().map_or(Ok(1), |raw| count(Some(raw), "n"))?;
            Command::Next(from, n)
        }
        "remaining" => Command::Remaining(instant(args.next(), "from")?),
        "occurring" => Command::Occurring(instant(args.next(), "time")?),
        "at" => Command::At(instant(args.next(), "time")?),
        "on" => {
            let raw = args.next().context("missing <day>")?;
            Command::On(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid <day> {raw:?}, expected YYYY-MM-DD"))?,
            )
        }
        "describe" => Command::Describe,
        "ical" => Command::Ical,
        "json" => Command::Json,
        other => bail!("unknown command {other:?}"),
    };

    if let Some(extra) = args.next() {
        bail!("unexpected argument {extra:?}");
    }

    Ok(Invocation { path, command })
}

/// ## Summary
/// Reads a schedule from `path`: iCalendar for `.ics` files, a JSON record
/// otherwise.
///
/// ## Errors
/// Returns an error if the file cannot be read or does not describe a valid
/// schedule.
pub fn load_schedule(path: &Path, limits: ExpansionLimits) -> Result<Schedule> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_ical = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ics"));
    let schedule = if is_ical {
        Schedule::from_ical(&text, limits)?
    } else {
        Schedule::from_json(&text, limits)?
    };

    tracing::debug!(path = %path.display(), is_ical, "Schedule loaded");
    Ok(schedule)
}

fn lines(instants: &[DateTime<Utc>]) -> String {
    instants
        .iter()
        .map(DateTime::to_rfc3339)
        .collect::<Vec<_>>()
        .join("\n")
}

/// ## Summary
/// Runs `command` against `schedule` and returns the text to print.
///
/// ## Errors
/// Returns the schedule's query error, e.g. for `all` on a schedule that
/// never ends.
pub fn run(schedule: &Schedule, command: &Command) -> Result<String> {
    let output = match *command {
        Command::All => lines(&schedule.all_occurrences()?),
        Command::First(n) => lines(&schedule.first(n)?),
        Command::Upto(end) => lines(&schedule.occurrences(end)?),
        Command::Between(begin, end) => lines(&schedule.occurrences_between(begin, end)?),
        Command::Next(from, n) => lines(&schedule.next_occurrences(n, from)?),
        Command::Remaining(from) => lines(&schedule.remaining_occurrences(from)?),
        Command::Occurring(time) => schedule.occurring_at(time)?.to_string(),
        Command::At(time) => schedule.occurs_at(time)?.to_string(),
        Command::On(day) => schedule.occurs_on(day)?.to_string(),
        Command::Describe => schedule.to_string(),
        Command::Ical => schedule.to_ical(),
        Command::Json => schedule.to_json()?,
    };
    Ok(output)
}
