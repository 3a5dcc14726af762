//! Front-end configuration
//!
//! Read from an optional JSON file; every key is optional and falls back to the
//! defaults below. Command-line flags are applied on top by the binary.
//!
//! ```json
//! {
//!   "server_url": "http://localhost:8080",
//!   "initial_tab": "tokens",
//!   "examples": ["example1.txt", "example2.txt"],
//!   "connect_timeout_secs": 5,
//!   "placeholders": { "tokens": "Compile to see tokens" }
//! }
//! ```

use crate::view::{Placeholders, TabId};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the compiler service
    pub server_url: String,
    /// Tab marked active at startup
    pub initial_tab: TabId,
    /// Example file names offered by the picker
    pub examples: Vec<String>,
    pub connect_timeout_secs: u64,
    pub placeholders: Placeholders,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: DEFAULT_SERVER_URL.to_string(),
            initial_tab: TabId::Tokens,
            examples: Vec::new(),
            connect_timeout_secs: 5,
            placeholders: Placeholders::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(
            r#"{"initial_tab": "bytecode", "placeholders": {"ast": "no tree yet"}}"#,
        )
        .unwrap();

        assert_eq!(config.initial_tab, TabId::Bytecode);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.placeholders.ast, "no tree yet");
        assert_eq!(
            config.placeholders.tokens,
            Placeholders::default().tokens
        );
    }

    #[test]
    fn test_unknown_tab_is_rejected() {
        assert!(Config::from_json(r#"{"initial_tab": "history"}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/stagetty.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
