//! Simulator event log
//!
//! Keeps the most recent entries, newest first, for the log panel.

use serde::{Deserialize, Serialize};

use crate::consts::EVENT_LOG_CAPACITY;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Danger,
    Success,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Danger => "danger",
            LogLevel::Success => "success",
        }
    }

    /// CSS class for the log panel row
    pub fn css_class(&self) -> String {
        format!("log-entry log-{}", self.as_str())
    }
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unix timestamp (ms) when recorded
    pub timestamp_ms: f64,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded event log (newest at index 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record an entry at the front, dropping the oldest past capacity
    pub fn push(&mut self, timestamp_ms: f64, level: LogLevel, message: impl Into<String>) {
        self.entries.insert(
            0,
            LogEntry {
                timestamp_ms,
                level,
                message: message.into(),
            },
        );
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
