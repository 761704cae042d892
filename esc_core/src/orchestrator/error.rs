//! Error aggregation and exit signalling for shortcut operations

use crate::aliases::AliasError;
use crate::config::ConfigError;
use crate::fs::FsError;
use crate::history::HistoryError;
use crate::logging::codes;
use crate::render::RenderError;
use crate::session::StateError;
use thiserror::Error;

/// Broad failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; only the current operation is aborted
    UserInput,
    /// The filesystem, a process or the store failed
    Environment,
    /// Saved state could not be read
    StateCorruption,
}

/// Process exit status for an operation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Success,
    UserError,
    NothingToDo,
    EnvironmentError,
    StateCorruption,
}

impl ExitSignal {
    pub fn code(&self) -> i32 {
        match self {
            ExitSignal::Success => 0,
            ExitSignal::UserError => 1,
            ExitSignal::NothingToDo => 2,
            ExitSignal::EnvironmentError => 3,
            ExitSignal::StateCorruption => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum ShortcutError {
    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    FileSystem(#[from] FsError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Malformed arguments: {reason}")]
    MalformedArgs { reason: String },

    #[error("Missing argument: {name}")]
    MissingArgument { name: String },

    #[error("Invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("File \"{path}\" does not exist")]
    FileNotFound { path: String },
}

impl ShortcutError {
    pub fn malformed_args(reason: &str) -> Self {
        Self::MalformedArgs {
            reason: reason.to_string(),
        }
    }

    pub fn missing_argument(name: &str) -> Self {
        Self::MissingArgument {
            name: name.to_string(),
        }
    }

    pub fn file_not_found(path: &str) -> Self {
        Self::FileNotFound {
            path: path.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileSystem(_) | Self::Config(_) => ErrorKind::Environment,
            Self::State(StateError::Deserialization { .. }) => ErrorKind::StateCorruption,
            Self::State(_) => ErrorKind::Environment,
            Self::Alias(_)
            | Self::History(_)
            | Self::Render(_)
            | Self::MalformedArgs { .. }
            | Self::MissingArgument { .. }
            | Self::InvalidPattern { .. }
            | Self::FileNotFound { .. } => ErrorKind::UserInput,
        }
    }

    pub fn exit_signal(&self) -> ExitSignal {
        if let Self::History(HistoryError::NoPreviousInvocation) = self {
            return ExitSignal::NothingToDo;
        }
        match self.kind() {
            ErrorKind::UserInput => ExitSignal::UserError,
            ErrorKind::Environment => ExitSignal::EnvironmentError,
            ErrorKind::StateCorruption => ExitSignal::StateCorruption,
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Alias(e) => e.error_code(),
            Self::History(e) => e.error_code(),
            Self::Render(e) => e.error_code(),
            Self::FileSystem(e) => e.error_code(),
            Self::State(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::MalformedArgs { .. } => codes::arguments::MALFORMED_ARGS,
            Self::MissingArgument { .. } => codes::arguments::MISSING_ARGUMENT,
            Self::InvalidPattern { .. } => codes::arguments::INVALID_PATTERN,
            Self::FileNotFound { .. } => codes::files::FILE_NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_signals() {
        let nothing: ShortcutError = HistoryError::NoPreviousInvocation.into();
        assert_eq!(nothing.exit_signal(), ExitSignal::NothingToDo);
        assert_eq!(nothing.kind(), ErrorKind::UserInput);

        let corrupt: ShortcutError = StateError::Deserialization {
            reason: "eof".to_string(),
        }
        .into();
        assert_eq!(corrupt.exit_signal().code(), 4);

        let io: ShortcutError = StateError::io("/tmp/state.json", "denied").into();
        assert_eq!(io.exit_signal(), ExitSignal::EnvironmentError);

        let missing = ShortcutError::file_not_found("/a.go");
        assert_eq!(missing.exit_signal().code(), 1);
        assert_eq!(missing.to_string(), "File \"/a.go\" does not exist");
    }

    #[test]
    fn test_error_codes_are_registered() {
        let errors: Vec<ShortcutError> = vec![
            AliasError::not_found("x").into(),
            HistoryError::IndexOutOfRange { index: 3, len: 1 }.into(),
            RenderError::incompatible_flags("daemon").into(),
            FsError::Stat {
                path: "/a".to_string(),
                reason: "denied".to_string(),
            }
            .into(),
            ShortcutError::malformed_args("too many"),
            ShortcutError::missing_argument("alias"),
            ShortcutError::InvalidPattern {
                pattern: "(".to_string(),
                reason: "unclosed".to_string(),
            },
        ];

        for error in errors {
            assert!(
                codes::get_error_metadata(error.error_code().as_str()).is_some(),
                "unregistered code for {}",
                error
            );
        }
    }
}
