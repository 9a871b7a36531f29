use thiserror::Error;

/// Schedule construction, query and serialization errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    RuleError(#[from] cadence_rule::RuleError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

impl ScheduleError {
    /// Returns the core error behind this one, if any.
    #[must_use]
    pub const fn as_core(&self) -> Option<&cadence_core::error::CoreError> {
        match self {
            Self::CoreError(err) | Self::RuleError(cadence_rule::RuleError::CoreError(err)) => {
                Some(err)
            }
            _ => None,
        }
    }
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
