//! Invocation rendering
//!
//! Builds the argv that opens a set of files, either as a foreground editor
//! or as an eval request sent to a running editor daemon.

pub mod error;

pub use error::RenderError;

use crate::config::constants::{
    CHANGE_DIRECTORY_COMMAND, CLIENT_EVAL_FLAG, CLIENT_TTY_FLAG, DEBUG_INIT_FLAG, DEFAULT_CLIENT,
    DEFAULT_EDITOR, NO_WINDOW_SYSTEM_FLAG,
};
use crate::history::InvocationRecord;
use crate::interpreter::FileSpec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Direct,
    Daemon,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Direct => "direct",
            RenderMode::Daemon => "daemon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub debug_init: bool,
    pub editor: String,
    pub client: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Direct,
            debug_init: false,
            editor: DEFAULT_EDITOR.to_string(),
            client: DEFAULT_CLIENT.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn daemon() -> Self {
        Self {
            mode: RenderMode::Daemon,
            ..Self::default()
        }
    }

    pub fn with_debug_init(mut self, debug_init: bool) -> Self {
        self.debug_init = debug_init;
        self
    }

    pub fn with_binaries(mut self, editor: &str, client: &str) -> Self {
        self.editor = editor.to_string();
        self.client = client.to_string();
        self
    }

    /// Reject option combinations that can never render
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.mode == RenderMode::Daemon && self.debug_init {
            return Err(RenderError::incompatible_flags(
                "--debug-init is not allowed in daemon mode",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    /// Run `argv` as a process
    Exec,
    /// Change the caller's working directory to `argv[1]`
    Cd,
}

/// A rendered command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: InvocationKind,
    pub argv: Vec<String>,
}

impl Invocation {
    pub fn exec(argv: Vec<String>) -> Self {
        Self {
            kind: InvocationKind::Exec,
            argv,
        }
    }

    pub fn change_directory(path: &str) -> Self {
        Self {
            kind: InvocationKind::Cd,
            argv: vec![CHANGE_DIRECTORY_COMMAND.to_string(), path.to_string()],
        }
    }

    /// Rebuild an invocation from a stored record
    pub fn from_record(record: &InvocationRecord) -> Self {
        match record.executable.as_slice() {
            [command, path] if command == CHANGE_DIRECTORY_COMMAND => Self::change_directory(path),
            _ => Self::exec(record.executable.clone()),
        }
    }

    pub fn is_change_directory(&self) -> bool {
        self.kind == InvocationKind::Cd
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    pub fn to_record(&self) -> InvocationRecord {
        InvocationRecord::new(self.argv.clone())
    }

    /// The argv as one POSIX shell command line
    pub fn to_shell_string(&self) -> String {
        self.argv
            .iter()
            .map(|word| shell_quote(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Render `specs`, which arrive in reversed command-line order
pub fn render(specs: &[FileSpec], options: &RenderOptions) -> Result<Invocation, RenderError> {
    options.validate()?;
    if specs.is_empty() {
        return Err(RenderError::EmptyFileList);
    }

    let argv = match options.mode {
        RenderMode::Direct => render_direct(specs, options),
        RenderMode::Daemon => render_daemon(specs, options),
    };

    Ok(Invocation::exec(argv))
}

fn render_direct(specs: &[FileSpec], options: &RenderOptions) -> Vec<String> {
    let mut argv = Vec::with_capacity(3 + 2 * specs.len());
    argv.push(options.editor.clone());
    argv.push(NO_WINDOW_SYSTEM_FLAG.to_string());
    if options.debug_init {
        argv.push(DEBUG_INIT_FLAG.to_string());
    }

    for spec in specs {
        if spec.has_line() {
            argv.push(format!("+{}", spec.line));
        }
        argv.push(spec.path.clone());
    }

    argv
}

// Windows open in command-line order, so the reversed specs are walked backwards.
fn render_daemon(specs: &[FileSpec], options: &RenderOptions) -> Vec<String> {
    let mut forms = Vec::with_capacity(2 * specs.len() + 1);

    for (position, spec) in specs.iter().rev().enumerate() {
        let open = if position == 0 {
            "find-file"
        } else {
            "find-file-other-window"
        };
        forms.push(format!("({} \"{}\")", open, elisp_escape(&spec.path)));
        if spec.has_line() {
            forms.push(format!("(goto-line {})", spec.line));
        }
    }

    if specs.len() == 2 {
        forms.push("(other-window 1)".to_string());
    }

    vec![
        options.client.clone(),
        CLIENT_TTY_FLAG.to_string(),
        CLIENT_EVAL_FLAG.to_string(),
        format!("(progn {})", forms.join(" ")),
    ]
}

fn elisp_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn shell_quote(word: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c);
    if !word.is_empty() && word.chars().all(is_safe) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
