use crate::logging::codes;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Incompatible flags: {reason}")]
    IncompatibleFlags { reason: String },

    #[error("No files to open")]
    EmptyFileList,
}

impl RenderError {
    pub fn incompatible_flags(reason: &str) -> Self {
        Self::IncompatibleFlags {
            reason: reason.to_string(),
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::IncompatibleFlags { .. } => codes::arguments::INCOMPATIBLE_FLAGS,
            Self::EmptyFileList => codes::arguments::MISSING_ARGUMENT,
        }
    }
}
