use thiserror::Error;

/// Rule parsing and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
