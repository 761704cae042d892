//! # emacs shortcuts CLI
//!
//! Command-line front end for `esc_core`: argument parsing, the JSON state
//! store, and the launcher that runs rendered editor commands.

pub mod app;
pub mod cli;
pub mod commands;
pub mod launcher;
pub mod paths;
pub mod store;

pub use app::{execute, init_logging, load_config, report, AppError};
pub use cli::{Cli, Command};
pub use commands::{dispatch, Outcome};
pub use launcher::{EditorLauncher, LaunchError};
pub use store::StateStore;
