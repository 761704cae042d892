//! Session state
//!
//! Aliases plus invocation history, loaded once per process from JSON and
//! written back only when something changed.

pub mod error;

pub use error::StateError;

use crate::aliases::{AliasResult, AliasTable, DeleteReport};
use crate::history::{HistoryLedger, InvocationRecord};
use crate::log_info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(alias = "Aliases", default)]
    aliases: AliasTable,

    #[serde(alias = "PreviousExecutions", default)]
    history: HistoryLedger,

    #[serde(skip)]
    changed: bool,
}

impl SessionState {
    /// Fresh state with the given history capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            aliases: AliasTable::new(),
            history: HistoryLedger::new(capacity),
            changed: false,
        }
    }

    /// Parse saved state; an empty document is a fresh state
    pub fn load(json: &str, capacity: usize) -> Result<Self, StateError> {
        if json.trim().is_empty() {
            return Ok(Self::new(capacity));
        }

        let mut state: SessionState =
            serde_json::from_str(json).map_err(|e| StateError::Deserialization {
                reason: e.to_string(),
            })?;

        let evicted = state.history.set_capacity(capacity);
        if evicted > 0 {
            log_info!("Trimmed saved history to capacity",
                "evicted" => evicted,
                "capacity" => capacity
            );
            state.changed = true;
        }

        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string_pretty(self).map_err(|e| StateError::Serialization {
            reason: e.to_string(),
        })
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    pub fn add_alias(&mut self, alias: &str, paths: Vec<String>) -> AliasResult<()> {
        self.aliases.add(alias, paths)?;
        self.changed = true;
        Ok(())
    }

    pub fn delete_aliases<S: AsRef<str>>(&mut self, aliases: &[S]) -> DeleteReport {
        let report = self.aliases.delete_many(aliases);
        if !report.deleted.is_empty() {
            self.changed = true;
        }
        report
    }

    pub fn record(&mut self, record: InvocationRecord) {
        self.history.append(record);
        self.changed = true;
    }
}
