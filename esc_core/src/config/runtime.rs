// RUNTIME PREFERENCES (User Experience)

use super::constants::{DEFAULT_CLIENT, DEFAULT_EDITOR, DEFAULT_HISTORY_LIMIT};
use crate::logging::codes;
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file: {reason}")]
    Parse { reason: String },
}

impl ConfigError {
    pub fn error_code(&self) -> codes::Code {
        codes::system::CONFIGURATION_ERROR
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Binary launched in direct mode
    pub editor: String,

    /// Binary used to reach a running editor daemon
    pub client: String,

    /// Render daemon-client commands unless the caller asks otherwise
    pub daemon_by_default: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            editor: env::var(env_vars::EDITOR).unwrap_or_else(|_| DEFAULT_EDITOR.to_string()),
            client: env::var(env_vars::CLIENT).unwrap_or_else(|_| DEFAULT_CLIENT.to_string()),
            daemon_by_default: env::var(env_vars::DAEMON)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPreferences {
    /// Number of invocations kept
    pub limit: usize,
}

impl Default for HistoryPreferences {
    fn default() -> Self {
        Self {
            limit: env::var(env_vars::HISTORY_LIMIT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Most verbose level emitted
    pub min_log_level: LogLevel,

    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env::var(env_vars::LOG_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePreferences {
    /// Explicit state file; the platform data directory is used when unset
    pub state_file: Option<PathBuf>,
}

impl Default for StorePreferences {
    fn default() -> Self {
        Self {
            state_file: env::var_os(env_vars::STATE_FILE).map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub editor: EditorPreferences,
    pub history: HistoryPreferences,
    pub logging: LoggingPreferences,
    pub store: StorePreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; omitted keys keep their environment defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file, or the defaults when the file does not exist
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_toml_str(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.editor.editor.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "editor.editor".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.editor.client.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "editor.client".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const CONFIG_FILE: &str = "ESC_CONFIG";
    pub const EDITOR: &str = "ESC_EDITOR";
    pub const CLIENT: &str = "ESC_CLIENT";
    pub const DAEMON: &str = "ESC_DAEMON";
    pub const HISTORY_LIMIT: &str = "ESC_HISTORY_LIMIT";
    pub const LOG_LEVEL: &str = "ESC_LOG_LEVEL";
    pub const LOG_STRUCTURED: &str = "ESC_LOG_STRUCTURED";
    pub const STATE_FILE: &str = "ESC_STATE_FILE";
}
