//! HTTP server configuration

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// HTTP server binding
///
/// # Example
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 5000
/// max_upload_bytes = 33554432
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Largest accepted upload payload in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// The `host:port` string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ConfigError::missing_field("server", "host"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "server",
                "max_upload_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}
