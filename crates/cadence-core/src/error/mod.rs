use thiserror::Error;

/// Core error taxonomy shared by rule heads and schedules.
///
/// Every variant is raised synchronously by the call that violates its
/// contract; nothing is deferred to a later query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid end time: {0}")]
    InvalidEndTime(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Schedule is unbounded: every recurrence rule needs a count or until, or the schedule an end time")]
    UnboundedSchedule,

    #[error("Expansion exceeded maximum limit of {0} occurrences")]
    TooManyOccurrences(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
