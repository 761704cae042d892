//! Alias table
//!
//! Maps a short name to one or more stored paths. Lookup is an exact string
//! match on the raw token, done before any path normalization.

pub mod error;

pub use error::{AliasError, AliasResult};

use crate::log_warning;
use regex::Regex;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alias name to ordered, non-empty path list, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: BTreeMap<String, Vec<String>>,
}

/// Outcome of a batch delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub missing: Vec<AliasError>,
}

impl DeleteReport {
    pub fn has_warnings(&self) -> bool {
        !self.missing.is_empty()
    }

    /// One message per name that could not be deleted
    pub fn warnings(&self) -> Vec<String> {
        self.missing.iter().map(|e| e.to_string()).collect()
    }
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    /// Paths bound to `alias`, if any
    pub fn resolve(&self, alias: &str) -> Option<&[String]> {
        self.entries.get(alias).map(Vec::as_slice)
    }

    /// Bind `alias` to `paths`; an existing binding is never overwritten
    pub fn add(&mut self, alias: &str, paths: Vec<String>) -> AliasResult<()> {
        if self.entries.contains_key(alias) {
            return Err(AliasError::already_exists(alias));
        }
        if paths.is_empty() {
            return Err(AliasError::without_paths(alias));
        }
        self.entries.insert(alias.to_string(), paths);
        Ok(())
    }

    /// Remove `alias`, returning the paths it pointed to
    pub fn delete(&mut self, alias: &str) -> AliasResult<Vec<String>> {
        self.entries
            .remove(alias)
            .ok_or_else(|| AliasError::not_found(alias))
    }

    /// Delete every existing name; missing names become warnings
    pub fn delete_many<S: AsRef<str>>(&mut self, aliases: &[S]) -> DeleteReport {
        let mut report = DeleteReport::default();

        for alias in aliases {
            let alias = alias.as_ref();
            match self.delete(alias) {
                Ok(_) => report.deleted.push(alias.to_string()),
                Err(e) => {
                    log_warning!(&e.to_string(), "alias" => alias);
                    report.missing.push(e);
                }
            }
        }

        report
    }

    /// Status line for a single alias
    pub fn get(&self, alias: &str) -> AliasResult<String> {
        self.entries
            .get(alias)
            .map(|paths| format_line(alias, paths))
            .ok_or_else(|| AliasError::not_found(alias))
    }

    /// Status lines for every alias, sorted by name
    pub fn list(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(alias, paths)| format_line(alias, paths))
            .collect()
    }

    /// Status lines for aliases with any path matching `pattern`
    pub fn search(&self, pattern: &Regex) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, paths)| paths.iter().any(|p| pattern.is_match(p)))
            .map(|(alias, paths)| format_line(alias, paths))
            .collect()
    }
}

fn format_line(alias: &str, paths: &[String]) -> String {
    format!("{}: {}", alias, paths.join(" "))
}

/// Stored value: older state files hold a single path or null
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPaths {
    One(String),
    Many(Vec<String>),
    Missing(()),
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<BTreeMap<String, StoredPaths>> = Option::deserialize(deserializer)?;

        let entries = raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(alias, stored)| {
                let paths = match stored {
                    StoredPaths::One(path) => vec![path],
                    StoredPaths::Many(paths) => paths,
                    StoredPaths::Missing(()) => Vec::new(),
                };
                // An alias with nothing to open is dropped on load.
                (!paths.is_empty()).then_some((alias, paths))
            })
            .collect();

        Ok(Self { entries })
    }
}
