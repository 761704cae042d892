use crate::logging::codes;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("History index {index} is out of range; only {len} previous invocations are stored")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No previous invocation to repeat")]
    NoPreviousInvocation,
}

impl HistoryError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::IndexOutOfRange { .. } => codes::history::INDEX_OUT_OF_RANGE,
            Self::NoPreviousInvocation => codes::history::NO_PREVIOUS_INVOCATION,
        }
    }
}
