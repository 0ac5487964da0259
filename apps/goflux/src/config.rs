//! Client configuration.
//!
//! Reads the `client` section of the same `goflux.json` file the server
//! tooling uses. Other sections are ignored.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default store address.
const DEFAULT_SERVER_URL: &str = "http://localhost";

/// Default block size (1 MiB).
const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// On-disk layout of `goflux.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    client: ClientConfig,
}

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the store, e.g. `http://95.145.216.175`.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Block size in bytes. Zero falls back to 1 MiB.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.into()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ClientConfig {
    /// Loads the `client` section from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let file: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(file.client)
    }

    /// Writes this configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = ConfigFile {
            client: self.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Loads `path`, or writes and returns the defaults if it does not exist.
    ///
    /// The flag is `true` when the file was created.
    pub fn load_or_create(path: &Path) -> anyhow::Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::load(path)?, false));
        }
        let config = Self::default();
        config.save(path)?;
        Ok((config, true))
    }
}
