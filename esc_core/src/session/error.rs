use crate::logging::codes;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Failed to deserialize saved state: {reason}")]
    Deserialization { reason: String },

    #[error("Failed to serialize state: {reason}")]
    Serialization { reason: String },

    #[error("State store I/O error on {path}: {reason}")]
    Io { path: String, reason: String },
}

impl StateError {
    pub fn io(path: &str, reason: impl ToString) -> Self {
        Self::Io {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Deserialization { .. } => codes::state::DESERIALIZATION_FAILED,
            Self::Serialization { .. } => codes::state::SERIALIZATION_FAILED,
            Self::Io { .. } => codes::state::STORE_IO_ERROR,
        }
    }
}
