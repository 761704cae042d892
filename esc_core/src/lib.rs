// Internal modules
pub mod aliases;
pub mod config;
pub mod fs;
pub mod history;
pub mod interpreter;
#[macro_use]
pub mod logging;
pub mod orchestrator;
pub mod render;
pub mod session;

// Re-export key types for library consumers
pub use aliases::{AliasError, AliasTable, DeleteReport};
pub use config::{ConfigError, RuntimeConfig};
pub use fs::{FileStat, FileSystem, FsError, MemoryFileSystem, OsFileSystem};
pub use history::{HistoryError, HistoryLedger, InvocationRecord};
pub use interpreter::{interpret, pair_tokens, FileSpec};
pub use orchestrator::{
    ErrorKind, ExitSignal, OpenOptions, Orchestrator, OrchestratorSettings, ShortcutError,
};
pub use render::{render, Invocation, InvocationKind, RenderError, RenderMode, RenderOptions};
pub use session::{SessionState, StateError};
