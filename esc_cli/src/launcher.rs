//! Process launching for rendered invocations

use esc_core::logging::codes;
use esc_core::{log_debug, Invocation, OrchestratorSettings};
use std::collections::HashSet;
use std::io;
use std::process::Command;

/// Runs editor invocations, restricted to a whitelist of programs
#[derive(Clone, Debug, Default)]
pub struct EditorLauncher {
    allowed_programs: HashSet<String>,
}

impl EditorLauncher {
    /// Launcher with an empty whitelist
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher allowing the configured editor and client
    pub fn for_settings(settings: &OrchestratorSettings) -> Self {
        let mut launcher = Self::new();
        launcher.allow_programs(&[settings.editor.as_str(), settings.client.as_str()]);
        launcher
    }

    pub fn allow_program(&mut self, program: impl Into<String>) {
        self.allowed_programs.insert(program.into());
    }

    pub fn allow_programs(&mut self, programs: &[&str]) {
        for program in programs {
            self.allowed_programs.insert(program.to_string());
        }
    }

    pub fn is_allowed(&self, program: &str) -> bool {
        self.allowed_programs.contains(program)
    }

    /// Run the invocation in the foreground and return its exit code
    pub fn launch(&self, invocation: &Invocation) -> Result<i32, LaunchError> {
        if invocation.is_change_directory() {
            return Err(LaunchError::NotExecutable {
                reason: "a directory change must be evaluated by the calling shell".to_string(),
            });
        }

        let program = invocation.program().ok_or_else(|| LaunchError::NotExecutable {
            reason: "empty command".to_string(),
        })?;

        if !self.is_allowed(program) {
            return Err(LaunchError::ProgramNotAllowed {
                program: program.to_string(),
            });
        }

        log_debug!("Launching editor", "command" => invocation.to_shell_string());

        // The editor needs the terminal, so stdio and environment are inherited.
        let status = Command::new(program)
            .args(invocation.args())
            .status()
            .map_err(|e| LaunchError::from_spawn(program, e))?;

        // Killed by a signal: report a generic failure.
        Ok(status.code().unwrap_or(1))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Program not found: {program}")]
    ProgramNotFound { program: String },

    #[error("Program '{program}' is not an allowed editor or client")]
    ProgramNotAllowed { program: String },

    #[error("Permission denied: {program}")]
    PermissionDenied { program: String },

    #[error("Failed to launch '{program}': {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error("Invocation cannot be launched: {reason}")]
    NotExecutable { reason: String },
}

impl LaunchError {
    fn from_spawn(program: &str, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::ProgramNotFound {
                program: program.to_string(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                program: program.to_string(),
            },
            _ => Self::LaunchFailed {
                program: program.to_string(),
                reason: error.to_string(),
            },
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::ProgramNotFound { .. } => codes::execution::PROGRAM_NOT_FOUND,
            Self::ProgramNotAllowed { .. } => codes::execution::PROGRAM_NOT_ALLOWED,
            Self::PermissionDenied { .. }
            | Self::LaunchFailed { .. }
            | Self::NotExecutable { .. } => codes::execution::LAUNCH_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(argv: &[&str]) -> Invocation {
        Invocation::exec(argv.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_whitelist() {
        let launcher = EditorLauncher::new();
        assert!(!launcher.is_allowed("emacs"));
        assert!(!launcher.is_allowed("rm"));
    }

    #[test]
    fn test_whitelist_from_settings() {
        let launcher = EditorLauncher::for_settings(&OrchestratorSettings::default());
        assert!(launcher.is_allowed("emacs"));
        assert!(launcher.is_allowed("emacsclient"));
        assert!(!launcher.is_allowed("sh"));
    }

    #[test]
    fn test_whitelist_management() {
        let mut launcher = EditorLauncher::new();

        launcher.allow_program("emacs");
        assert!(launcher.is_allowed("emacs"));
        assert!(!launcher.is_allowed("emacsclient"));

        launcher.allow_programs(&["emacsclient", "/opt/bin/emacs"]);
        assert!(launcher.is_allowed("emacsclient"));
        assert!(launcher.is_allowed("/opt/bin/emacs"));
    }

    #[test]
    fn test_refuses_programs_outside_whitelist() {
        let launcher = EditorLauncher::for_settings(&OrchestratorSettings::default());
        let result = launcher.launch(&exec(&["rm", "-rf", "/"]));

        match result {
            Err(LaunchError::ProgramNotAllowed { program }) => assert_eq!(program, "rm"),
            _ => panic!("Expected ProgramNotAllowed error"),
        }
    }

    #[test]
    fn test_refuses_change_directory() {
        let launcher = EditorLauncher::for_settings(&OrchestratorSettings::default());
        let result = launcher.launch(&Invocation::change_directory("/tmp"));
        assert!(matches!(result, Err(LaunchError::NotExecutable { .. })));
    }

    #[test]
    fn test_missing_program() {
        let mut launcher = EditorLauncher::new();
        launcher.allow_program("esc-test-no-such-editor");

        let result = launcher.launch(&exec(&["esc-test-no-such-editor", "a.go"]));
        match result {
            Err(e @ LaunchError::ProgramNotFound { .. }) => {
                assert_eq!(e.error_code(), codes::execution::PROGRAM_NOT_FOUND)
            }
            other => panic!("Expected ProgramNotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_propagates_exit_code() {
        let mut launcher = EditorLauncher::new();
        launcher.allow_program("sh");

        assert_eq!(launcher.launch(&exec(&["sh", "-c", "exit 3"])).unwrap(), 3);
        assert_eq!(launcher.launch(&exec(&["sh", "-c", "true"])).unwrap(), 0);
    }
}
