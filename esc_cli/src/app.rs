//! Process-level wiring: configuration, logging, state, dispatch and launch

use crate::cli::Cli;
use crate::commands::dispatch;
use crate::launcher::{EditorLauncher, LaunchError};
use crate::paths;
use crate::store::StateStore;
use esc_core::config::LoggingPreferences;
use esc_core::logging::{self, codes, LogFacadeLogger, LogLevel, LoggingService};
use esc_core::{
    log_debug, ExitSignal, Orchestrator, OrchestratorSettings, OsFileSystem, RuntimeConfig,
    ShortcutError,
};
use std::io::{self, Write};
use std::sync::Arc;

/// Failures that end the process
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Shortcut(#[from] ShortcutError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl AppError {
    pub fn exit_signal(&self) -> ExitSignal {
        match self {
            Self::Shortcut(e) => e.exit_signal(),
            Self::Launch(_) | Self::Output(_) => ExitSignal::EnvironmentError,
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Shortcut(e) => e.error_code(),
            Self::Launch(e) => e.error_code(),
            Self::Output(_) => codes::system::INTERNAL_ERROR,
        }
    }
}

/// Runtime config from the environment, overridden by the config file
pub fn load_config() -> Result<RuntimeConfig, ShortcutError> {
    let config = match paths::config_file() {
        Some(path) => RuntimeConfig::load_file(&path)?,
        None => {
            let config = RuntimeConfig::default();
            config.validate()?;
            config
        }
    };
    Ok(config)
}

/// Install the global logging service
///
/// Plain-text events go through the `log` facade to `env_logger`, so
/// `RUST_LOG` can narrow them further. Structured logging writes JSON lines
/// to stderr directly.
pub fn init_logging(preferences: &LoggingPreferences) {
    if logging::is_initialized() {
        return;
    }

    if preferences.use_structured_logging {
        let _ = logging::init_global_logging(preferences);
        return;
    }

    let _ = env_logger::Builder::new()
        .filter_level(level_filter(preferences.min_log_level))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();

    let service = LoggingService::new(Arc::new(LogFacadeLogger), preferences.min_log_level);
    let _ = logging::init_global_logging_with_service(Arc::new(service));
}

fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warning => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
    }
}

/// Run one command line against the saved state and return the exit code
pub fn execute<O: Write, E: Write>(
    cli: Cli,
    config: &RuntimeConfig,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<i32, AppError> {
    let store = StateStore::new(paths::state_file(&config.store).map_err(ShortcutError::from)?);
    let settings = OrchestratorSettings::from_config(config);
    let launcher = EditorLauncher::for_settings(&settings);

    let state = store
        .load(settings.history_limit)
        .map_err(ShortcutError::from)?;
    let mut orchestrator = Orchestrator::new(state, OsFileSystem, settings);

    let outcome = dispatch(cli, &mut orchestrator, config.editor.daemon_by_default)?;

    // Persist before launching; the editor may run for a long time.
    let mut state = orchestrator.into_state();
    store
        .save_if_changed(&mut state)
        .map_err(ShortcutError::from)?;

    for warning in &outcome.warnings {
        writeln!(stderr, "{}", warning)?;
    }
    for line in &outcome.lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;

    match outcome.launch {
        Some(invocation) => Ok(launcher.launch(&invocation)?),
        None => Ok(ExitSignal::Success.code()),
    }
}

/// Print a failure for the user and return its exit code
pub fn report<E: Write>(error: &AppError, stderr: &mut E) -> i32 {
    let code = error.error_code();
    log_debug!("Operation failed",
        "code" => code,
        "category" => codes::get_category(code.as_str())
    );
    let _ = writeln!(stderr, "Error [{}]: {}", code, error);
    error.exit_signal().code()
}
