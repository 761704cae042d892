//! Fixed values for the shortcut engine

/// Number of invocations kept in the history ledger unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 25;

/// Maximum number of file and line tokens accepted for one invocation
pub const MAX_FILE_TOKENS: usize = 4;

/// Editor launched in direct mode
pub const DEFAULT_EDITOR: &str = "emacs";

/// Client used to talk to a running editor daemon
pub const DEFAULT_CLIENT: &str = "emacsclient";

pub const NO_WINDOW_SYSTEM_FLAG: &str = "--no-window-system";
pub const DEBUG_INIT_FLAG: &str = "--debug-init";
pub const CLIENT_TTY_FLAG: &str = "-t";
pub const CLIENT_EVAL_FLAG: &str = "-e";

pub const CHANGE_DIRECTORY_COMMAND: &str = "cd";

/// Capacity of the in-memory test logger
pub const LOG_BUFFER_SIZE: usize = 1000;

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "esc";
pub const STATE_FILE_NAME: &str = "state.json";
pub const CONFIG_FILE_NAME: &str = "config.toml";
