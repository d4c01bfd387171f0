//! Human-readable execution log produced by the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Headers,
    Duplicates,
    Amount,
    Status,
    Date,
}

impl Stage {
    /// All stages in the order they run.
    pub const ALL: [Stage; 5] = [
        Stage::Headers,
        Stage::Duplicates,
        Stage::Amount,
        Stage::Status,
        Stage::Date,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Headers => "Header Normalizer",
            Self::Duplicates => "Deduplicator",
            Self::Amount => "Amount Coercer",
            Self::Status => "Status Normalizer",
            Self::Date => "Date Normalizer",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One log line and the stage that wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub stage: Stage,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Append-only, ordered log of stage effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanLog {
    entries: Vec<LogEntry>,
}

impl CleanLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Stage, message: impl Into<String>) {
        self.entries.push(LogEntry {
            stage,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages only, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.message.as_str()).collect()
    }

    /// The entry written by `stage`, if it ran.
    pub fn entry_for(&self, stage: Stage) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| entry.stage == stage)
    }
}

impl<'a> IntoIterator for &'a CleanLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_order() {
        let mut log = CleanLog::new();
        log.push(Stage::Headers, "first");
        log.push(Stage::Duplicates, "second");
        assert_eq!(log.messages(), vec!["first", "second"]);
        assert_eq!(log.entry_for(Stage::Duplicates).unwrap().message, "second");
        assert!(log.entry_for(Stage::Date).is_none());
    }

    #[test]
    fn test_stage_order() {
        let mut stages = Stage::ALL.to_vec();
        stages.sort();
        assert_eq!(stages, Stage::ALL.to_vec());
        assert_eq!(Stage::Amount.to_string(), "Amount Coercer");
    }
}
