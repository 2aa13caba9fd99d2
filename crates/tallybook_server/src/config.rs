//! Server configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags or environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tallybook_core::default_log_level;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `expenses.json` and `todos.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Interface to bind
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// HTTP port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// One of trace|debug|info|warn|error
    #[serde(default = "default_log_level_string")]
    pub log_level: String,

    /// Rolling log directory, `<data_dir>/logs` when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    3000
}

fn default_log_level_string() -> String {
    default_log_level().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_host: default_bind_host(),
            http_port: default_http_port(),
            log_level: default_log_level_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Socket address built from `bind_host` and `http_port`
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind_host, self.http_port).parse()
    }

    /// Absolute log directory, resolved against `base` when relative
    pub fn resolved_log_dir(&self, base: &Path) -> PathBuf {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"));
        if dir.is_absolute() {
            dir
        } else {
            base.join(dir)
        }
    }
}
