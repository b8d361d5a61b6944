//! Log records and severity levels
//!
//! A `LogRecord` is one scanned line of a log file as delivered to viewers.
//! Records keep the arrival order of the lines they came from; that order is
//! preserved end-to-end through the registry and the tail broadcaster.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity level of a log record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Detect the level from the first severity token in a line
    ///
    /// Matches whole uppercase/lowercase tokens like `ERROR`, `[warn]` or
    /// `level=debug`. Lines without a recognizable token default to `Info`.
    pub fn detect(line: &str) -> Self {
        for token in line.split(|c: char| !c.is_ascii_alphanumeric()) {
            match token {
                "ERROR" | "error" | "ERR" | "FATAL" => return Self::Error,
                "WARN" | "warn" | "WARNING" | "warning" => return Self::Warn,
                "INFO" | "info" => return Self::Info,
                "DEBUG" | "debug" => return Self::Debug,
                "TRACE" | "trace" => return Self::Trace,
                _ => continue,
            }
        }
        Self::Info
    }

    /// Lowercase name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// One structured log line
///
/// Produced by the redaction engine scanning one raw line. `redacted` marks
/// lines the active policy modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Time the record was produced by the pipeline
    pub timestamp: DateTime<Utc>,
    /// Detected severity
    pub level: LogLevel,
    /// Line text after redaction
    pub message: String,
    /// Whether the redaction policy modified this line
    pub redacted: bool,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(message: impl Into<String>, level: LogLevel, redacted: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            redacted,
        }
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
