//! Error types for alias management

use crate::logging::codes;
use thiserror::Error;

/// Result type for alias operations
pub type AliasResult<T> = Result<T, AliasError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("Alias \"{alias}\" already exists")]
    AlreadyExists { alias: String },

    #[error("Alias \"{alias}\" does not exist")]
    NotFound { alias: String },

    #[error("Alias \"{alias}\" must point to at least one path")]
    WithoutPaths { alias: String },
}

impl AliasError {
    pub fn already_exists(alias: &str) -> Self {
        Self::AlreadyExists {
            alias: alias.to_string(),
        }
    }

    pub fn not_found(alias: &str) -> Self {
        Self::NotFound {
            alias: alias.to_string(),
        }
    }

    pub fn without_paths(alias: &str) -> Self {
        Self::WithoutPaths {
            alias: alias.to_string(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            Self::AlreadyExists { alias } | Self::NotFound { alias } | Self::WithoutPaths { alias } => {
                alias
            }
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::AlreadyExists { .. } => codes::aliases::ALIAS_ALREADY_EXISTS,
            Self::NotFound { .. } => codes::aliases::ALIAS_NOT_FOUND,
            Self::WithoutPaths { .. } => codes::aliases::ALIAS_WITHOUT_PATHS,
        }
    }
}
