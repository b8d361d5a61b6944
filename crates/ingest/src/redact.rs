//! The redaction engine
//!
//! A [`RedactionPolicy`] scans one line and returns the possibly-modified
//! text plus a flag saying whether anything was redacted. Policies are
//! total (every input produces an output) and deterministic: same line,
//! same policy, same result - this is what makes re-sanitizing an
//! unchanged original reproduce the identical sanitized hash.
//!
//! What counts as sensitive is the policy's business; the pipeline only
//! records and propagates the result.

use regex::{Regex, RegexBuilder};

use logtide_protocol::{LogLevel, LogRecord};

use crate::error::{IngestError, Result};

/// Result of scanning one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// The line text after redaction
    pub text: String,
    /// Whether the policy modified the line
    pub redacted: bool,
}

/// A pluggable redaction policy
pub trait RedactionPolicy: Send + Sync {
    /// Scan one line
    ///
    /// Must be total and deterministic; never panics on well-formed text.
    fn scan(&self, line: &str) -> Scan;
}

/// Policy that redacts from the first pattern match to end of line
///
/// Patterns are compiled once at construction; scanning is stateless.
/// Matching is case-insensitive. A pattern matching at column 0 replaces
/// the whole line.
#[derive(Debug)]
pub struct RegexPolicy {
    patterns: Vec<Regex>,
    replacement: String,
}

impl RegexPolicy {
    /// Compile a pattern set
    ///
    /// Fails on the first invalid pattern; scanning never fails.
    pub fn new<S: AsRef<str>>(patterns: &[S], replacement: impl Into<String>) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| IngestError::InvalidPattern {
                        pattern: p.as_ref().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            replacement: replacement.into(),
        })
    }

    /// Earliest match start across all patterns
    fn first_match(&self, line: &str) -> Option<usize> {
        self.patterns
            .iter()
            .filter_map(|re| re.find(line).map(|m| m.start()))
            .min()
    }
}

impl RedactionPolicy for RegexPolicy {
    fn scan(&self, line: &str) -> Scan {
        match self.first_match(line) {
            Some(start) => Scan {
                text: format!("{}{}", &line[..start], self.replacement),
                redacted: true,
            },
            None => Scan {
                text: line.to_string(),
                redacted: false,
            },
        }
    }
}

/// Policy that redacts nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPolicy;

impl RedactionPolicy for NoopPolicy {
    fn scan(&self, line: &str) -> Scan {
        Scan {
            text: line.to_string(),
            redacted: false,
        }
    }
}

/// Scan one raw line into a record
///
/// Non-UTF-8 bytes are replaced lossily before scanning; the level is
/// detected from the text before redaction so a redacted suffix cannot
/// hide the severity token.
pub fn scan_line(policy: &dyn RedactionPolicy, raw: &[u8]) -> LogRecord {
    let line = String::from_utf8_lossy(raw);
    let level = LogLevel::detect(&line);
    let scan = policy.scan(&line);
    LogRecord::new(scan.text, level, scan.redacted)
}

#[cfg(test)]
#[path = "redact_test.rs"]
mod tests;
