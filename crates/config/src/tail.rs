//! Live-tail broadcaster configuration

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Tuning for the per-file tail broadcaster
///
/// # Example
///
/// ```toml
/// [tail]
/// max_lag = 1024
/// max_subscribers = 100
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TailConfig {
    /// How far (in records) a subscriber may fall behind the producer
    /// before its oldest buffered records are dropped and a gap is marked
    pub max_lag: usize,

    /// Maximum concurrent subscribers per file
    pub max_subscribers: usize,
}

impl TailConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_lag == 0 {
            return Err(ConfigError::invalid_value(
                "tail",
                "max_lag",
                "must be greater than zero",
            ));
        }
        if self.max_subscribers == 0 {
            return Err(ConfigError::invalid_value(
                "tail",
                "max_subscribers",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            max_lag: 1024,
            max_subscribers: 100,
        }
    }
}
