//! JSON file store for session state
//!
//! Saves go through a temporary sibling file and a rename, so an interrupted
//! write never leaves a truncated state file behind.

use esc_core::logging::codes;
use esc_core::{log_error, log_success, SessionState, StateError};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }

    /// Raw contents; a missing file reads as empty
    pub fn read(&self) -> Result<String, StateError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(StateError::io(&self.path_string(), e)),
        }
    }

    /// Load state, moving an unreadable file aside before reporting it
    pub fn load(&self, capacity: usize) -> Result<SessionState, StateError> {
        let contents = self.read()?;
        match SessionState::load(&contents, capacity) {
            Ok(state) => {
                log_success!(codes::success::STATE_LOADED, "Loaded saved state",
                    "path" => self.path.display(),
                    "aliases" => state.aliases().len(),
                    "history" => state.history().len()
                );
                Ok(state)
            }
            Err(e @ StateError::Deserialization { .. }) => {
                log_error!(e.error_code(), &e.to_string(), "path" => self.path.display());
                self.quarantine()?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, state: &SessionState) -> Result<(), StateError> {
        let json = state.to_json()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StateError::io(&self.path_string(), e))?;
            }
        }

        let tmp_path = self.sibling(TEMP_SUFFIX);
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp_path);
            return Err(StateError::io(&self.path_string(), e));
        }

        log_success!(codes::success::STATE_SAVED, "Saved state", "path" => self.path.display());
        Ok(())
    }

    /// Save only when the state changed; returns whether a write happened
    pub fn save_if_changed(&self, state: &mut SessionState) -> Result<bool, StateError> {
        if !state.is_changed() {
            return Ok(false);
        }
        self.save(state)?;
        state.mark_saved();
        Ok(true)
    }

    /// Move the state file to `<name>.corrupt` so the next run starts fresh
    pub fn quarantine(&self) -> Result<PathBuf, StateError> {
        let target = self.sibling(CORRUPT_SUFFIX);
        fs::rename(&self.path, &target).map_err(|e| StateError::io(&self.path_string(), e))?;
        Ok(target)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }
}
