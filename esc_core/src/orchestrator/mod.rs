//! Command orchestration
//!
//! Sequences one shortcut invocation: interpret tokens, expand aliases, apply
//! the existence policy, render, then record. Every check runs before the
//! ledger is touched, so a failed invocation leaves the session unchanged.

pub mod error;

pub use error::{ErrorKind, ExitSignal, ShortcutError};

use crate::aliases::{AliasError, DeleteReport};
use crate::config::constants::{DEFAULT_HISTORY_LIMIT, MAX_FILE_TOKENS};
use crate::config::RuntimeConfig;
use crate::fs::FileSystem;
use crate::history::HistoryError;
use crate::interpreter::{pair_tokens, FileSpec};
use crate::logging::codes;
use crate::render::{render, Invocation, RenderMode, RenderOptions};
use crate::session::SessionState;
use crate::{log_debug, log_success};
use regex::Regex;

/// Result type for orchestrated operations
pub type ShortcutResult<T> = Result<T, ShortcutError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub history_limit: usize,
    pub editor: String,
    pub client: String,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            editor: render.editor,
            client: render.client,
        }
    }
}

impl OrchestratorSettings {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            history_limit: config.history.limit,
            editor: config.editor.editor.clone(),
            client: config.editor.client.clone(),
        }
    }
}

/// Per-call switches for opening files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    /// Skip the existence check so new files can be created
    pub allow_new_files: bool,
    pub mode: RenderMode,
    pub debug_init: bool,
}

pub struct Orchestrator<F: FileSystem> {
    state: SessionState,
    fs: F,
    settings: OrchestratorSettings,
}

impl<F: FileSystem> Orchestrator<F> {
    pub fn new(state: SessionState, fs: F, settings: OrchestratorSettings) -> Self {
        Self {
            state,
            fs,
            settings,
        }
    }

    /// Build from saved JSON, applying the configured history capacity
    pub fn from_json(json: &str, fs: F, settings: OrchestratorSettings) -> ShortcutResult<Self> {
        let state = SessionState::load(json, settings.history_limit)?;
        Ok(Self::new(state, fs, settings))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    fn render_options(&self, options: &OpenOptions) -> RenderOptions {
        RenderOptions {
            mode: options.mode,
            debug_init: options.debug_init,
            editor: self.settings.editor.clone(),
            client: self.settings.client.clone(),
        }
    }

    /// Turn tokens into an invocation, recording it when files were opened
    pub fn open<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        options: &OpenOptions,
    ) -> ShortcutResult<Invocation> {
        let render_options = self.render_options(options);
        render_options.validate()?;

        let tokens: Vec<&str> = tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !t.trim().is_empty())
            .collect();

        if tokens.len() > MAX_FILE_TOKENS {
            return Err(ShortcutError::malformed_args(&format!(
                "expected at most {} file and line arguments, got {}",
                MAX_FILE_TOKENS,
                tokens.len()
            )));
        }

        if tokens.is_empty() {
            return self.repeat_last();
        }

        if let [single] = tokens.as_slice() {
            if let Some(directory) = self.change_directory_target(single)? {
                log_success!(codes::success::CHANGE_DIRECTORY, "Changing directory",
                    "path" => &directory
                );
                return Ok(Invocation::change_directory(&directory));
            }
        }

        let specs = self.resolve_specs(&tokens, options.allow_new_files)?;
        let invocation = render(&specs, &render_options)?;

        self.state.record(invocation.to_record());
        log_success!(codes::success::INVOCATION_RENDERED, "Rendered editor invocation",
            "files" => specs.len(),
            "mode" => options.mode.as_str()
        );

        Ok(invocation)
    }

    fn repeat_last(&self) -> ShortcutResult<Invocation> {
        let record = self
            .state
            .history()
            .last()
            .ok_or(HistoryError::NoPreviousInvocation)?;

        log_success!(codes::success::INVOCATION_REPEATED, "Repeating last invocation",
            "command" => record.command_line()
        );
        Ok(Invocation::from_record(record))
    }

    // A lone directory, or an alias bound to exactly one directory. Stat
    // failures here mean "not a directory"; the existence check reports them.
    fn change_directory_target(&self, token: &str) -> ShortcutResult<Option<String>> {
        let (candidate, from_alias) = match self.state.aliases().resolve(token) {
            Some([path]) => (path.as_str(), true),
            Some(_) => return Ok(None),
            None => (token, false),
        };

        if !matches!(self.fs.stat(candidate), Ok(stat) if stat.is_directory) {
            return Ok(None);
        }

        if from_alias {
            Ok(Some(candidate.to_string()))
        } else {
            Ok(Some(self.fs.absolute_path(candidate)?))
        }
    }

    /// Pair, expand aliases, resolve and check paths; reversed for rendering
    ///
    /// Alias values are used as stored. Only unresolved tokens are made
    /// absolute.
    fn resolve_specs(&self, tokens: &[&str], allow_new_files: bool) -> ShortcutResult<Vec<FileSpec>> {
        let mut specs = Vec::with_capacity(tokens.len());

        for spec in pair_tokens(tokens) {
            match self.state.aliases().resolve(&spec.path) {
                Some(paths) => {
                    log_debug!("Expanding alias",
                        "alias" => &spec.path,
                        "paths" => paths.len()
                    );
                    let last = paths.len() - 1;
                    for (position, path) in paths.iter().enumerate() {
                        let line = if position == last { spec.line } else { 0 };
                        self.check_exists(path, allow_new_files)?;
                        specs.push(FileSpec::new(path.as_str(), line));
                    }
                }
                None => {
                    let path = self.checked_path(&spec.path, allow_new_files)?;
                    specs.push(FileSpec::new(path, spec.line));
                }
            }
        }

        specs.reverse();
        Ok(specs)
    }

    fn checked_path(&self, path: &str, allow_new_files: bool) -> ShortcutResult<String> {
        let absolute = self.fs.absolute_path(path)?;
        self.check_exists(&absolute, allow_new_files)?;
        Ok(absolute)
    }

    fn check_exists(&self, path: &str, allow_new_files: bool) -> ShortcutResult<()> {
        if !allow_new_files && !self.fs.stat(path)?.exists {
            return Err(ShortcutError::file_not_found(path));
        }
        Ok(())
    }

    /// Stored invocation by recency; replaying never appends
    pub fn replay(&self, index: usize) -> ShortcutResult<Invocation> {
        let record = self.state.history().get(index)?;
        log_success!(codes::success::INVOCATION_REPEATED, "Replaying invocation",
            "index" => index,
            "command" => record.command_line()
        );
        Ok(Invocation::from_record(record))
    }

    pub fn history_lines(&self, verbose: bool) -> Vec<String> {
        self.state.history().lines(verbose)
    }

    /// Bind `alias` to the absolute forms of `files`
    pub fn add_alias<S: AsRef<str>>(
        &mut self,
        alias: &str,
        files: &[S],
        allow_new_files: bool,
    ) -> ShortcutResult<Vec<String>> {
        if alias.trim().is_empty() {
            return Err(ShortcutError::missing_argument("alias"));
        }
        if self.state.aliases().contains(alias) {
            return Err(AliasError::already_exists(alias).into());
        }
        if files.is_empty() {
            return Err(AliasError::without_paths(alias).into());
        }

        let paths = files
            .iter()
            .map(|file| self.checked_path(file.as_ref(), allow_new_files))
            .collect::<ShortcutResult<Vec<String>>>()?;

        self.state.add_alias(alias, paths.clone())?;
        log_success!(codes::success::ALIAS_ADDED, "Alias added",
            "alias" => alias,
            "paths" => paths.join(" ")
        );

        Ok(paths)
    }

    /// Delete every existing alias in `aliases`; missing ones are reported
    pub fn delete_aliases<S: AsRef<str>>(&mut self, aliases: &[S]) -> ShortcutResult<DeleteReport> {
        if aliases.is_empty() {
            return Err(ShortcutError::missing_argument("alias"));
        }

        let report = self.state.delete_aliases(aliases);
        for alias in &report.deleted {
            log_success!(codes::success::ALIAS_DELETED, "Alias deleted", "alias" => alias);
        }

        Ok(report)
    }

    pub fn get_alias(&self, alias: &str) -> ShortcutResult<String> {
        Ok(self.state.aliases().get(alias)?)
    }

    pub fn list_aliases(&self) -> Vec<String> {
        self.state.aliases().list()
    }

    pub fn search_aliases(&self, pattern: &str) -> ShortcutResult<Vec<String>> {
        let regex = Regex::new(pattern).map_err(|e| ShortcutError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.state.aliases().search(&regex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FsError, MemoryFileSystem};
    use crate::history::InvocationRecord;
    use crate::render::{InvocationKind, RenderError};
    use assert_matches::assert_matches;

    fn memory_fs() -> MemoryFileSystem {
        MemoryFileSystem::new("/work")
            .with_file("a.go")
            .with_file("b.go")
            .with_file("c.go")
            .with_file("/compounds/sodiumChloride")
            .with_file("/catan/oreAndWheat")
            .with_file("/catan/sheep")
            .with_directory("src")
            .with_directory("/projects/catan")
    }

    fn orchestrator() -> Orchestrator<MemoryFileSystem> {
        orchestrator_with_capacity(25)
    }

    fn orchestrator_with_capacity(capacity: usize) -> Orchestrator<MemoryFileSystem> {
        let settings = OrchestratorSettings {
            history_limit: capacity,
            ..OrchestratorSettings::default()
        };
        let mut state = SessionState::new(capacity);
        state
            .add_alias("salt", vec!["/compounds/sodiumChloride".to_string()])
            .unwrap();
        state
            .add_alias(
                "city",
                vec!["/catan/oreAndWheat".to_string(), "/catan/sheep".to_string()],
            )
            .unwrap();
        state
            .add_alias("board", vec!["/projects/catan".to_string()])
            .unwrap();
        state.mark_saved();
        Orchestrator::new(state, memory_fs(), settings)
    }

    fn direct() -> OpenOptions {
        OpenOptions::default()
    }

    #[test]
    fn test_open_renders_and_records() {
        let mut orch = orchestrator();

        let invocation = orch.open(&["a.go", "b.go", "32"], &direct()).unwrap();
        assert_eq!(
            invocation.argv,
            vec!["emacs", "--no-window-system", "+32", "/work/b.go", "/work/a.go"]
        );
        assert_eq!(orch.state().history().len(), 1);
        assert_eq!(orch.state().history().get(0).unwrap().executable, invocation.argv);
        assert!(orch.state().is_changed());
    }

    #[test]
    fn test_missing_file_fails_without_recording() {
        let mut orch = orchestrator();

        let result = orch.open(&["a.go", "missing.go"], &direct());
        assert_matches!(result, Err(ShortcutError::FileNotFound { ref path }) if path == "/work/missing.go");
        assert!(orch.state().history().is_empty());
        assert!(!orch.state().is_changed());
    }

    #[test]
    fn test_allow_new_files_skips_existence_check() {
        let mut orch = orchestrator();
        let options = OpenOptions {
            allow_new_files: true,
            ..direct()
        };

        let invocation = orch.open(&["new.go", "3"], &options).unwrap();
        assert_eq!(
            invocation.argv,
            vec!["emacs", "--no-window-system", "+3", "/work/new.go"]
        );
    }

    #[test]
    fn test_alias_expands_in_place() {
        let mut orch = orchestrator();

        let invocation = orch.open(&["city", "9", "a.go"], &direct()).unwrap();
        assert_eq!(
            invocation.argv,
            vec![
                "emacs",
                "--no-window-system",
                "/work/a.go",
                "+9",
                "/catan/sheep",
                "/catan/oreAndWheat",
            ]
        );
    }

    #[test]
    fn test_alias_lookup_is_exact() {
        let mut orch = orchestrator();
        let result = orch.open(&["./salt"], &direct());
        assert_matches!(result, Err(ShortcutError::FileNotFound { .. }));
    }

    #[test]
    fn test_alias_paths_follow_existence_policy() {
        let settings = OrchestratorSettings::default();
        let mut state = SessionState::new(25);
        state
            .add_alias("gone", vec!["/deleted/file.go".to_string()])
            .unwrap();
        let mut orch = Orchestrator::new(state, memory_fs(), settings);

        assert_matches!(
            orch.open(&["gone"], &direct()),
            Err(ShortcutError::FileNotFound { .. })
        );

        let options = OpenOptions {
            allow_new_files: true,
            ..direct()
        };
        assert!(orch.open(&["gone"], &options).is_ok());
    }

    #[test]
    fn test_too_many_tokens() {
        let mut orch = orchestrator();
        let result = orch.open(&["a.go", "1", "b.go", "2", "c.go"], &direct());
        assert_matches!(result, Err(ShortcutError::MalformedArgs { .. }));
        assert!(orch.state().history().is_empty());
    }

    #[test]
    fn test_blank_tokens_are_ignored() {
        let mut orch = orchestrator();
        let invocation = orch.open(&["", "a.go", "  "], &direct()).unwrap();
        assert_eq!(invocation.argv.last().map(String::as_str), Some("/work/a.go"));
    }

    #[test]
    fn test_zero_tokens_with_empty_history() {
        let mut orch = orchestrator();
        let tokens: [&str; 0] = [];

        let result = orch.open(&tokens, &direct());
        assert_matches!(
            result,
            Err(ShortcutError::History(HistoryError::NoPreviousInvocation))
        );
        assert_eq!(result.unwrap_err().exit_signal(), ExitSignal::NothingToDo);
    }

    #[test]
    fn test_zero_tokens_repeats_last_without_appending() {
        let mut orch = orchestrator();
        let first = orch.open(&["a.go"], &direct()).unwrap();
        let second = orch.open(&["b.go"], &direct()).unwrap();
        assert_ne!(first, second);

        let tokens: [&str; 0] = [];
        let repeated = orch.open(&tokens, &direct()).unwrap();
        assert_eq!(repeated, second);
        assert_eq!(orch.state().history().len(), 2);
    }

    #[test]
    fn test_daemon_with_debug_init_is_rejected_first() {
        let mut orch = orchestrator();
        let options = OpenOptions {
            mode: RenderMode::Daemon,
            debug_init: true,
            ..direct()
        };

        let tokens: [&str; 0] = [];
        assert_matches!(
            orch.open(&tokens, &options),
            Err(ShortcutError::Render(RenderError::IncompatibleFlags { .. }))
        );
        assert_matches!(
            orch.open(&["a.go"], &options),
            Err(ShortcutError::Render(RenderError::IncompatibleFlags { .. }))
        );
        assert!(orch.state().history().is_empty());
    }

    #[test]
    fn test_daemon_open() {
        let mut orch = orchestrator();
        let options = OpenOptions {
            mode: RenderMode::Daemon,
            ..direct()
        };

        let invocation = orch.open(&["a.go", "3", "b.go"], &options).unwrap();
        assert_eq!(invocation.argv[0], "emacsclient");
        assert_eq!(
            invocation.argv[3],
            r#"(progn (find-file "/work/a.go") (goto-line 3) (find-file-other-window "/work/b.go") (other-window 1))"#
        );
    }

    #[test]
    fn test_single_directory_changes_directory() {
        let mut orch = orchestrator();

        let invocation = orch.open(&["src"], &direct()).unwrap();
        assert_eq!(invocation.kind, InvocationKind::Cd);
        assert_eq!(invocation.argv, vec!["cd", "/work/src"]);
        assert!(orch.state().history().is_empty());
    }

    #[test]
    fn test_alias_to_directory_changes_directory() {
        let mut orch = orchestrator();

        let invocation = orch.open(&["board"], &direct()).unwrap();
        assert_eq!(invocation.argv, vec!["cd", "/projects/catan"]);
    }

    #[test]
    fn test_directory_among_files_is_not_cd() {
        let mut orch = orchestrator();
        let invocation = orch.open(&["src", "a.go"], &direct()).unwrap();
        assert_eq!(invocation.kind, InvocationKind::Exec);
    }

    #[test]
    fn test_stat_failure_is_environment_error() {
        let fs = memory_fs().with_stat_failure("locked.go", "permission denied");
        let mut orch = Orchestrator::new(SessionState::new(25), fs, OrchestratorSettings::default());

        let result = orch.open(&["locked.go"], &direct());
        assert_matches!(result, Err(ShortcutError::FileSystem(FsError::Stat { .. })));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Environment);
    }

    #[test]
    fn test_stat_failure_with_new_files_opens_single_token() {
        let fs = memory_fs().with_stat_failure("locked.go", "permission denied");
        let mut orch = Orchestrator::new(SessionState::new(25), fs, OrchestratorSettings::default());
        let options = OpenOptions {
            allow_new_files: true,
            ..direct()
        };

        let single = orch.open(&["locked.go"], &options).unwrap();
        assert_eq!(single.kind, InvocationKind::Exec);
        assert_eq!(single.argv, vec!["emacs", "--no-window-system", "/work/locked.go"]);

        let pair = orch.open(&["locked.go", "b.go"], &options).unwrap();
        assert_eq!(
            pair.argv,
            vec!["emacs", "--no-window-system", "/work/b.go", "/work/locked.go"]
        );
    }

    #[test]
    fn test_alias_values_are_used_as_stored() {
        let json = r#"{"Aliases":{"city":["catan","oreAndWheat"]},"PreviousExecutions":null}"#;
        let fs = MemoryFileSystem::new("/work");
        let mut orch = Orchestrator::from_json(json, fs, OrchestratorSettings::default()).unwrap();

        let options = OpenOptions {
            allow_new_files: true,
            ..direct()
        };
        let invocation = orch.open(&["city", "5"], &options).unwrap();
        assert_eq!(
            invocation.argv,
            vec!["emacs", "--no-window-system", "+5", "oreAndWheat", "catan"]
        );

        assert_matches!(
            orch.open(&["city"], &direct()),
            Err(ShortcutError::FileNotFound { ref path }) if path == "catan"
        );
    }

    #[test]
    fn test_history_bounded_by_settings() {
        let mut orch = orchestrator_with_capacity(2);
        for file in ["a.go", "b.go", "c.go"] {
            orch.open(&[file], &direct()).unwrap();
        }

        assert_eq!(orch.state().history().len(), 2);
        assert_eq!(
            orch.history_lines(false),
            vec![
                " 1: emacs --no-window-system /work/b.go",
                " 0: emacs --no-window-system /work/c.go",
            ]
        );
    }

    #[test]
    fn test_replay_returns_record_unchanged() {
        let mut orch = orchestrator();
        let first = orch.open(&["a.go"], &direct()).unwrap();
        orch.open(&["b.go"], &direct()).unwrap();

        assert_eq!(orch.replay(1).unwrap(), first);
        assert_eq!(orch.state().history().len(), 2);
        assert_matches!(
            orch.replay(2),
            Err(ShortcutError::History(HistoryError::IndexOutOfRange { index: 2, len: 2 }))
        );
    }

    #[test]
    fn test_replay_of_legacy_cd_record() {
        let mut state = SessionState::new(25);
        state.record(InvocationRecord::unstamped(vec![
            "cd".to_string(),
            "/projects".to_string(),
        ]));
        let orch = Orchestrator::new(state, memory_fs(), OrchestratorSettings::default());

        assert!(orch.replay(0).unwrap().is_change_directory());
    }

    #[test]
    fn test_add_alias_stores_absolute_paths() {
        let mut orch = orchestrator();

        let paths = orch.add_alias("pair", &["a.go", "b.go"], false).unwrap();
        assert_eq!(paths, vec!["/work/a.go", "/work/b.go"]);
        assert_eq!(orch.get_alias("pair").unwrap(), "pair: /work/a.go /work/b.go");
        assert!(orch.state().is_changed());
    }

    #[test]
    fn test_add_existing_alias_checked_before_files() {
        let mut orch = orchestrator();
        let before = orch.state().aliases().clone();

        let result = orch.add_alias("salt", &["missing.go"], false);
        assert_matches!(result, Err(ShortcutError::Alias(AliasError::AlreadyExists { .. })));
        assert_eq!(orch.state().aliases(), &before);
        assert!(!orch.state().is_changed());
    }

    #[test]
    fn test_add_alias_requires_existing_files() {
        let mut orch = orchestrator();

        assert_matches!(
            orch.add_alias("ghost", &["missing.go"], false),
            Err(ShortcutError::FileNotFound { .. })
        );
        assert!(!orch.state().aliases().contains("ghost"));

        orch.add_alias("ghost", &["missing.go"], true).unwrap();
        assert!(orch.state().aliases().contains("ghost"));
    }

    #[test]
    fn test_add_alias_argument_checks() {
        let mut orch = orchestrator();
        let none: [&str; 0] = [];

        assert_matches!(
            orch.add_alias("", &["a.go"], false),
            Err(ShortcutError::MissingArgument { .. })
        );
        assert_matches!(
            orch.add_alias("empty", &none, false),
            Err(ShortcutError::Alias(AliasError::WithoutPaths { .. }))
        );
    }

    #[test]
    fn test_batch_delete_known_and_unknown() {
        let mut orch = orchestrator();

        let report = orch.delete_aliases(&["salt", "unknown"]).unwrap();
        assert_eq!(report.deleted, vec!["salt".to_string()]);
        assert_eq!(report.missing.len(), 1);
        assert!(!orch.state().aliases().contains("salt"));
        assert!(orch.state().is_changed());
    }

    #[test]
    fn test_delete_requires_names() {
        let mut orch = orchestrator();
        let none: [&str; 0] = [];
        assert_matches!(
            orch.delete_aliases(&none),
            Err(ShortcutError::MissingArgument { .. })
        );
    }

    #[test]
    fn test_list_and_search() {
        let orch = orchestrator();

        assert_eq!(
            orch.list_aliases(),
            vec![
                "board: /projects/catan",
                "city: /catan/oreAndWheat /catan/sheep",
                "salt: /compounds/sodiumChloride",
            ]
        );
        assert_eq!(
            orch.search_aliases("^/catan").unwrap(),
            vec!["city: /catan/oreAndWheat /catan/sheep"]
        );
        assert_matches!(
            orch.search_aliases("("),
            Err(ShortcutError::InvalidPattern { .. })
        );
    }

    #[test]
    fn test_get_missing_alias() {
        let orch = orchestrator();
        assert_matches!(
            orch.get_alias("nope"),
            Err(ShortcutError::Alias(AliasError::NotFound { .. }))
        );
    }

    #[test]
    fn test_from_json_applies_capacity() {
        let json = r#"{"history":[{"executable":["a"]},{"executable":["b"]},{"executable":["c"]}]}"#;
        let settings = OrchestratorSettings {
            history_limit: 1,
            ..OrchestratorSettings::default()
        };

        let orch = Orchestrator::from_json(json, memory_fs(), settings).unwrap();
        assert_eq!(orch.state().history().len(), 1);
        assert_eq!(orch.replay(0).unwrap().argv, vec!["c"]);

        let result = Orchestrator::from_json("{", memory_fs(), OrchestratorSettings::default());
        assert_matches!(result.map(|_| ()), Err(ref e) if e.kind() == ErrorKind::StateCorruption);
    }
}
