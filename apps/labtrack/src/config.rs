//! # Client Configuration
//!
//! A small TOML file holding the server URL and the UI language.
//!
//! ```toml
//! server_url = "http://127.0.0.1:8080"
//! language = "es"
//! ```
//!
//! A missing file means defaults; it is created on the first save.

use crate::client::ClientError;
use labtrack_core::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "labtrack.toml";

/// Default server address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub language: Language,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            language: Language::default(),
        }
    }
}

impl ClientConfig {
    /// Load from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        let content = toml::to_string(self)
            .map_err(|e| ClientError::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Change the language and persist it immediately.
    pub fn persist_language(&mut self, path: &Path, language: Language) -> Result<(), ClientError> {
        self.language = language;
        self.save(path)?;
        tracing::info!(language = %language, "Language preference saved");
        Ok(())
    }
}
