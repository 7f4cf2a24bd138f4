use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    BACKEND_SOCKET_PATH, FRONTEND_ID, RESPONSE_TIMEOUT_MS, STATUS_POLL_INTERVAL_SECS,
};
use crate::session::SessionOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub socket_path: PathBuf,
    pub client_id: String,
    pub poll_interval_secs: u64,
    pub response_timeout_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    // This field is not serialized, just used at runtime
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(BACKEND_SOCKET_PATH),
            client_id: FRONTEND_ID.to_string(),
            poll_interval_secs: STATUS_POLL_INTERVAL_SECS,
            response_timeout_ms: RESPONSE_TIMEOUT_MS,
            log_file: None,
            config_path: None,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to the built-in defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.socket_path.as_os_str().is_empty() {
            anyhow::bail!("socket_path cannot be empty");
        }
        if self.client_id.trim().is_empty() {
            anyhow::bail!("client_id cannot be empty");
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be at least 1");
        }
        if self.response_timeout_ms == 0 {
            anyhow::bail!("response_timeout_ms must be at least 1");
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            endpoint: self.socket_path.clone(),
            client_id: self.client_id.clone(),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            response_timeout: Duration::from_millis(self.response_timeout_ms),
        }
    }
}
