//! Filesystem capability
//!
//! The engine only needs to know whether a path exists, whether it is a
//! directory, and what its absolute form is. `OsFileSystem` answers from the
//! real filesystem; `MemoryFileSystem` answers from a fixed set of entries.

use crate::logging::codes;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Filesystem capability errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Cannot resolve absolute path for '{path}': {reason}")]
    PathResolution { path: String, reason: String },

    #[error("Cannot stat '{path}': {reason}")]
    Stat { path: String, reason: String },
}

impl FsError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::PathResolution { .. } => codes::files::PATH_RESOLUTION_FAILED,
            Self::Stat { .. } => codes::files::STAT_FAILED,
        }
    }
}

/// Result of a stat call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStat {
    pub exists: bool,
    pub is_directory: bool,
}

impl FileStat {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn file() -> Self {
        Self {
            exists: true,
            is_directory: false,
        }
    }

    pub fn directory() -> Self {
        Self {
            exists: true,
            is_directory: true,
        }
    }
}

pub trait FileSystem {
    /// Not-found is reported as `exists == false`, never as an error
    fn stat(&self, path: &str) -> Result<FileStat, FsError>;

    fn absolute_path(&self, path: &str) -> Result<String, FsError>;
}

/// Filesystem backed by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &str) -> Result<FileStat, FsError> {
        match std::fs::metadata(path) {
            Ok(metadata) => Ok(FileStat {
                exists: true,
                is_directory: metadata.is_dir(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileStat::missing()),
            Err(e) => Err(FsError::Stat {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn absolute_path(&self, path: &str) -> Result<String, FsError> {
        let absolute = std::path::absolute(path).map_err(|e| FsError::PathResolution {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let cleaned = lexically_normalize(&absolute);
        cleaned
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| FsError::PathResolution {
                path: path.to_string(),
                reason: "path is not valid UTF-8".to_string(),
            })
    }
}

/// Remove `.` and resolve `..` without touching the filesystem
fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// In-memory filesystem rooted at a fixed working directory
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    cwd: String,
    files: BTreeSet<String>,
    directories: BTreeSet<String>,
    failures: BTreeMap<String, String>,
}

impl MemoryFileSystem {
    pub fn new(cwd: &str) -> Self {
        let mut directories = BTreeSet::new();
        directories.insert(cwd.to_string());
        Self {
            cwd: cwd.to_string(),
            files: BTreeSet::new(),
            directories,
            failures: BTreeMap::new(),
        }
    }

    /// Register a file; relative paths are taken from the working directory
    pub fn with_file(mut self, path: &str) -> Self {
        let absolute = self.join(path);
        self.files.insert(absolute);
        self
    }

    pub fn with_directory(mut self, path: &str) -> Self {
        let absolute = self.join(path);
        self.directories.insert(absolute);
        self
    }

    /// Make `stat` fail for a path with the given reason
    pub fn with_stat_failure(mut self, path: &str, reason: &str) -> Self {
        let absolute = self.join(path);
        self.failures.insert(absolute, reason.to_string());
        self
    }

    fn join(&self, path: &str) -> String {
        let joined = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            Path::new(&self.cwd).join(path)
        };
        lexically_normalize(&joined).to_string_lossy().into_owned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn stat(&self, path: &str) -> Result<FileStat, FsError> {
        let absolute = self.join(path);
        if let Some(reason) = self.failures.get(&absolute) {
            return Err(FsError::Stat {
                path: path.to_string(),
                reason: reason.clone(),
            });
        }
        if self.directories.contains(&absolute) {
            Ok(FileStat::directory())
        } else if self.files.contains(&absolute) {
            Ok(FileStat::file())
        } else {
            Ok(FileStat::missing())
        }
    }

    fn absolute_path(&self, path: &str) -> Result<String, FsError> {
        if path.is_empty() {
            return Err(FsError::PathResolution {
                path: path.to_string(),
                reason: "empty path".to_string(),
            });
        }
        Ok(self.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_os_stat_reports_files_and_directories() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("main.go");
        fs::write(&file, "package main").unwrap();

        let fs_cap = OsFileSystem;
        assert_eq!(fs_cap.stat(file.to_str().unwrap()).unwrap(), FileStat::file());
        assert_eq!(
            fs_cap.stat(dir.path().to_str().unwrap()).unwrap(),
            FileStat::directory()
        );
        assert_eq!(
            fs_cap
                .stat(dir.path().join("absent").to_str().unwrap())
                .unwrap(),
            FileStat::missing()
        );
    }

    #[test]
    fn test_os_absolute_path_normalizes_dots() {
        let dir = tempdir().unwrap();
        let messy = format!("{}/./sub/../a.go", dir.path().display());

        let absolute = OsFileSystem.absolute_path(&messy).unwrap();
        assert_eq!(absolute, dir.path().join("a.go").to_str().unwrap());
    }

    #[test]
    fn test_os_absolute_path_of_relative_is_absolute() {
        let absolute = OsFileSystem.absolute_path("some/relative.go").unwrap();
        assert!(Path::new(&absolute).is_absolute());
        assert!(absolute.ends_with("some/relative.go"));
    }

    #[test]
    fn test_memory_fs_resolves_relative_paths() {
        let fs_cap = MemoryFileSystem::new("/work")
            .with_file("a.go")
            .with_directory("/tmp/project");

        assert_eq!(fs_cap.absolute_path("a.go").unwrap(), "/work/a.go");
        assert_eq!(fs_cap.absolute_path("../b.go").unwrap(), "/b.go");
        assert_eq!(fs_cap.stat("a.go").unwrap(), FileStat::file());
        assert_eq!(fs_cap.stat("/work/a.go").unwrap(), FileStat::file());
        assert_eq!(fs_cap.stat("/tmp/project").unwrap(), FileStat::directory());
        assert_eq!(fs_cap.stat("b.go").unwrap(), FileStat::missing());
    }

    #[test]
    fn test_memory_fs_stat_failure() {
        let fs_cap = MemoryFileSystem::new("/work").with_stat_failure("locked.go", "permission denied");

        let result = fs_cap.stat("locked.go");
        assert_matches!(result, Err(FsError::Stat { ref reason, .. }) if reason == "permission denied");
        assert_eq!(
            result.unwrap_err().error_code(),
            codes::files::STAT_FAILED
        );
    }
}
