//! History ledger
//!
//! A bounded record of the argv of past invocations, oldest first. Appending
//! beyond capacity evicts from the front. Callers address records by recency:
//! index 0 is the most recent.

pub mod error;

pub use error::HistoryError;

use crate::config::constants::DEFAULT_HISTORY_LIMIT;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;

/// The argv of one invocation that was run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRecord {
    #[serde(alias = "Executable", default)]
    pub executable: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl InvocationRecord {
    /// Record stamped with the current time
    pub fn new(executable: Vec<String>) -> Self {
        Self {
            executable,
            recorded_at: Some(Utc::now()),
        }
    }

    pub fn unstamped(executable: Vec<String>) -> Self {
        Self {
            executable,
            recorded_at: None,
        }
    }

    pub fn command_line(&self) -> String {
        self.executable.join(" ")
    }
}

impl fmt::Display for InvocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLedger {
    records: VecDeque<InvocationRecord>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Change the capacity, returning how many old records were evicted
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        self.evict()
    }

    pub fn append(&mut self, record: InvocationRecord) {
        self.records.push_back(record);
        self.evict();
    }

    fn evict(&mut self) -> usize {
        let excess = self.records.len().saturating_sub(self.capacity);
        self.records.drain(..excess);
        excess
    }

    /// Records oldest first
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &InvocationRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// Record by recency, 0 being the most recent
    pub fn get(&self, index: usize) -> Result<&InvocationRecord, HistoryError> {
        let len = self.records.len();
        if index >= len {
            return Err(HistoryError::IndexOutOfRange { index, len });
        }
        self.records
            .get(len - 1 - index)
            .ok_or(HistoryError::IndexOutOfRange { index, len })
    }

    pub fn last(&self) -> Option<&InvocationRecord> {
        self.records.back()
    }

    /// Numbered lines, oldest first, numbered so the most recent is 0
    pub fn lines(&self, verbose: bool) -> Vec<String> {
        let len = self.records.len();
        self.records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let index = len - 1 - position;
                match (verbose, record.recorded_at) {
                    (true, Some(at)) => format!(
                        "{:>2}: {} ({})",
                        index,
                        record.command_line(),
                        at.to_rfc3339_opts(SecondsFormat::Secs, true)
                    ),
                    _ => format!("{:>2}: {}", index, record.command_line()),
                }
            })
            .collect()
    }
}

impl Serialize for HistoryLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter())
    }
}

// Capacity is not persisted; loaders apply the configured one.
impl<'de> Deserialize<'de> for HistoryLedger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records: Option<VecDeque<InvocationRecord>> = Option::deserialize(deserializer)?;
        let records = records.unwrap_or_default();
        let capacity = records.len().max(DEFAULT_HISTORY_LIMIT);
        Ok(Self { records, capacity })
    }
}
