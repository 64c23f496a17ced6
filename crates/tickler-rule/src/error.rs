use thiserror::Error;

/// Recurrence parsing and evaluation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("invalid date {0:?}, expected YYYYMMDD")]
    InvalidDate(String),

    #[error("{0}")]
    InvalidRule(String),

    #[error("no occurrence found within {steps} months")]
    Exhausted { steps: u32 },

    #[error("next occurrence falls after the year 9999")]
    OutOfRange,
}

impl RuleError {
    pub(crate) fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule(message.into())
    }
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
