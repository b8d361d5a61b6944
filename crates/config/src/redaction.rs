//! Redaction pattern configuration
//!
//! The patterns only configure the shipped regex policy; the engine itself
//! accepts any policy implementation, so what counts as sensitive stays
//! pluggable.

use serde::Deserialize;

/// Pattern set for the regex redaction policy
///
/// # Example
///
/// ```toml
/// [redaction]
/// patterns = ["password=", "api[_-]?key", "authorization: bearer"]
/// replacement = "[REDACTED]"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Regex patterns marking a line as sensitive. Matching is
    /// case-insensitive; the line is redacted from the match onward.
    pub patterns: Vec<String>,

    /// Token written in place of redacted content
    pub replacement: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                "password=".to_string(),
                "passwd=".to_string(),
                "secret=".to_string(),
                "api[_-]?key".to_string(),
                "authorization: bearer".to_string(),
            ],
            replacement: "[REDACTED]".to_string(),
        }
    }
}
