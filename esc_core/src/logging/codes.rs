//! Error and success codes with their classification metadata
//!
//! Every failure the shortcut engine can report maps to exactly one code here.
//! The registry below carries category, severity and the action a user should
//! take, so log sinks and the CLI can describe a failure without matching on
//! the concrete error type.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Argument and flag validation codes
pub mod arguments {
    use super::Code;

    pub const MALFORMED_ARGS: Code = Code::new("E010");
    pub const MISSING_ARGUMENT: Code = Code::new("E011");
    pub const INCOMPATIBLE_FLAGS: Code = Code::new("E012");
    pub const INVALID_PATTERN: Code = Code::new("E013");
}

/// Alias table codes
pub mod aliases {
    use super::Code;

    pub const ALIAS_ALREADY_EXISTS: Code = Code::new("E020");
    pub const ALIAS_NOT_FOUND: Code = Code::new("E021");
    pub const ALIAS_WITHOUT_PATHS: Code = Code::new("E022");
}

/// History ledger codes
pub mod history {
    use super::Code;

    pub const INDEX_OUT_OF_RANGE: Code = Code::new("E030");
    pub const NO_PREVIOUS_INVOCATION: Code = Code::new("E031");
}

/// Filesystem capability codes
pub mod files {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E040");
    pub const PATH_RESOLUTION_FAILED: Code = Code::new("E041");
    pub const STAT_FAILED: Code = Code::new("E042");
}

/// Persisted state codes
pub mod state {
    use super::Code;

    pub const DESERIALIZATION_FAILED: Code = Code::new("E050");
    pub const SERIALIZATION_FAILED: Code = Code::new("E051");
    pub const STORE_IO_ERROR: Code = Code::new("E052");
}

/// Process launch codes
pub mod execution {
    use super::Code;

    pub const PROGRAM_NOT_FOUND: Code = Code::new("E060");
    pub const PROGRAM_NOT_ALLOWED: Code = Code::new("E061");
    pub const LAUNCH_FAILED: Code = Code::new("E062");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const STATE_LOADED: Code = Code::new("I002");
    pub const STATE_SAVED: Code = Code::new("I003");
    pub const INVOCATION_RENDERED: Code = Code::new("I010");
    pub const INVOCATION_REPEATED: Code = Code::new("I011");
    pub const CHANGE_DIRECTORY: Code = Code::new("I012");
    pub const ALIAS_ADDED: Code = Code::new("I020");
    pub const ALIAS_DELETED: Code = Code::new("I021");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                "Internal error",
                "File a bug report with the failing command line",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                "Logging or runtime initialization failed",
                "Check that the process is only initialized once",
            ),
            ErrorMetadata::new(
                "ERR003",
                "System",
                Severity::High,
                false,
                "Configuration is invalid",
                "Fix the ESC_* environment variables or the config file",
            ),
            // Arguments
            ErrorMetadata::new(
                "E010",
                "Arguments",
                Severity::Medium,
                true,
                "Too many file arguments",
                "Pass at most four file and line tokens",
            ),
            ErrorMetadata::new(
                "E011",
                "Arguments",
                Severity::Medium,
                true,
                "A required argument is missing",
                "Consult the command usage",
            ),
            ErrorMetadata::new(
                "E012",
                "Arguments",
                Severity::Medium,
                true,
                "Flags cannot be combined",
                "Drop one of the conflicting flags",
            ),
            ErrorMetadata::new(
                "E013",
                "Arguments",
                Severity::Medium,
                true,
                "Regular expression does not compile",
                "Fix the search pattern",
            ),
            // Aliases
            ErrorMetadata::new(
                "E020",
                "Aliases",
                Severity::Medium,
                true,
                "Alias is already defined",
                "Delete the existing alias first",
            ),
            ErrorMetadata::new(
                "E021",
                "Aliases",
                Severity::Low,
                true,
                "Alias does not exist",
                "List aliases to find the intended name",
            ),
            ErrorMetadata::new(
                "E022",
                "Aliases",
                Severity::Medium,
                true,
                "Alias needs at least one file",
                "Pass one or more files after the alias name",
            ),
            // History
            ErrorMetadata::new(
                "E030",
                "History",
                Severity::Medium,
                true,
                "History index is larger than the stored history",
                "List history to see the valid indices",
            ),
            ErrorMetadata::new(
                "E031",
                "History",
                Severity::Low,
                true,
                "No previous invocation to repeat",
                "Open a file first",
            ),
            // Files
            ErrorMetadata::new(
                "E040",
                "Files",
                Severity::Medium,
                true,
                "File does not exist",
                "Pass the new flag to create it",
            ),
            ErrorMetadata::new(
                "E041",
                "Files",
                Severity::High,
                false,
                "Absolute path could not be resolved",
                "Check that the working directory still exists",
            ),
            ErrorMetadata::new(
                "E042",
                "Files",
                Severity::High,
                false,
                "File metadata could not be read",
                "Check permissions on the path",
            ),
            // State
            ErrorMetadata::new(
                "E050",
                "State",
                Severity::High,
                false,
                "Persisted state is unreadable",
                "The corrupt file was moved aside; rerun the command",
            ),
            ErrorMetadata::new(
                "E051",
                "State",
                Severity::High,
                false,
                "State could not be serialized",
                "File a bug report",
            ),
            ErrorMetadata::new(
                "E052",
                "State",
                Severity::High,
                false,
                "State file could not be read or written",
                "Check permissions on the state directory",
            ),
            // Execution
            ErrorMetadata::new(
                "E060",
                "Execution",
                Severity::High,
                false,
                "Editor program was not found",
                "Install the editor or set ESC_EDITOR / ESC_CLIENT",
            ),
            ErrorMetadata::new(
                "E061",
                "Execution",
                Severity::High,
                false,
                "Program is not one of the configured editor binaries",
                "Replay only commands recorded with the current configuration",
            ),
            ErrorMetadata::new(
                "E062",
                "Execution",
                Severity::High,
                false,
                "Editor process could not be launched",
                "Check the editor installation",
            ),
            // Success
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                "Logging system initialized",
                "None",
            ),
            ErrorMetadata::new("I002", "State", Severity::Low, true, "State loaded", "None"),
            ErrorMetadata::new("I003", "State", Severity::Low, true, "State saved", "None"),
            ErrorMetadata::new(
                "I010",
                "Render",
                Severity::Low,
                true,
                "Editor invocation rendered",
                "None",
            ),
            ErrorMetadata::new(
                "I011",
                "Render",
                Severity::Low,
                true,
                "Previous invocation repeated",
                "None",
            ),
            ErrorMetadata::new(
                "I012",
                "Render",
                Severity::Low,
                true,
                "Change directory rendered",
                "None",
            ),
            ErrorMetadata::new("I020", "Aliases", Severity::Low, true, "Alias added", "None"),
            ErrorMetadata::new("I021", "Aliases", Severity::Low, true, "Alias deleted", "None"),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::CONFIGURATION_ERROR,
            arguments::MALFORMED_ARGS,
            arguments::MISSING_ARGUMENT,
            arguments::INCOMPATIBLE_FLAGS,
            arguments::INVALID_PATTERN,
            aliases::ALIAS_ALREADY_EXISTS,
            aliases::ALIAS_NOT_FOUND,
            aliases::ALIAS_WITHOUT_PATHS,
            history::INDEX_OUT_OF_RANGE,
            history::NO_PREVIOUS_INVOCATION,
            files::FILE_NOT_FOUND,
            files::PATH_RESOLUTION_FAILED,
            files::STAT_FAILED,
            state::DESERIALIZATION_FAILED,
            state::SERIALIZATION_FAILED,
            state::STORE_IO_ERROR,
            execution::PROGRAM_NOT_FOUND,
            execution::PROGRAM_NOT_ALLOWED,
            execution::LAUNCH_FAILED,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::STATE_LOADED,
            success::STATE_SAVED,
            success::INVOCATION_RENDERED,
            success::INVOCATION_REPEATED,
            success::CHANGE_DIRECTORY,
            success::ALIAS_ADDED,
            success::ALIAS_DELETED,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification_lookups() {
        assert_eq!(get_category("E020"), "Aliases");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(is_recoverable("E040"));
        assert!(!is_recoverable("E050"));
        assert_eq!(get_description("nope"), "Unknown error");
        assert_eq!(get_action("nope"), "No specific action available");
    }
}
