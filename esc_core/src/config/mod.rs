//! Configuration for the shortcut engine
//!
//! `constants` holds fixed values; `runtime` holds user preferences read from
//! `ESC_*` environment variables and an optional TOML file.

pub mod constants;
pub mod runtime;

pub use runtime::{
    ConfigError, EditorPreferences, HistoryPreferences, LoggingPreferences, RuntimeConfig,
    StorePreferences,
};
