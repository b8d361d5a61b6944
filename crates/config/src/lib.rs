//! Logtide Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! A minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use logtide_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[server]\nport = 8080").unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [storage]
//! data_dir = "logs/"
//! reject_duplicate_names = false
//!
//! [redaction]
//! patterns = ["password=", "api[_-]?key", "secret"]
//! replacement = "[REDACTED]"
//!
//! [tail]
//! max_lag = 1024
//!
//! [store]
//! kind = "disk"
//! path = "sanitized/"
//!
//! [log]
//! level = "info"
//! format = "console"
//! ```

mod error;
mod logging;
mod redaction;
mod server;
mod storage;
mod store;
mod tail;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevelFilter};
pub use redaction::RedactionConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use store::{StoreConfig, StoreKind};
pub use tail::TailConfig;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server binding
    pub server: ServerConfig,

    /// Registry storage location and name policy
    pub storage: StorageConfig,

    /// Redaction pattern set
    pub redaction: RedactionConfig,

    /// Live-tail broadcaster tuning
    pub tail: TailConfig,

    /// External artifact store for sanitized files
    pub store: StoreConfig,

    /// Internal logging
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        contents.parse()
    }

    /// Validate cross-section constraints
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.storage.validate()?;
        self.tail.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
