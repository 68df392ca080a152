//! Application configuration

use crate::utils::error::Result;
use crate::utils::paths::get_downloads_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

/// Environment variable overriding the backend base URL
pub const BACKEND_URL_ENV: &str = "VIDGRAB_BACKEND_URL";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the preview/download backend
    pub backend_url: String,

    /// Where downloaded files are saved
    pub download_location: PathBuf,

    /// Whole-request timeout in seconds, 0 disables it
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// User agent sent to the backend
    pub user_agent: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            download_location: get_downloads_dir(),
            request_timeout_secs: 300,
            connect_timeout_secs: 10,
            user_agent: concat!("vidgrab/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file. A missing file yields the defaults,
    /// missing keys are filled from the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path).await?;
        let settings: AppSettings = serde_json::from_str(&json)?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;
        Ok(())
    }

    /// Apply `VIDGRAB_BACKEND_URL` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}
