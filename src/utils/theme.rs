//! Persisted light/dark theme flag

use crate::utils::error::{Result, VidgrabError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, warn};

/// Theme preference, stored on disk as the bare string `dark` or `light`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    /// Read the flag from `path`. A missing, unreadable or unknown value
    /// yields the default.
    pub async fn load(path: &Path) -> Self {
        match fs::read_to_string(path).await {
            Ok(contents) => contents.parse().unwrap_or_else(|_| {
                warn!("Ignoring unknown theme value {:?} in {:?}", contents.trim(), path);
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No theme file at {:?}, using default", path);
                Self::default()
            }
            Err(e) => {
                warn!("Failed to read theme file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write the flag to `path`, creating the parent directory if needed.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, self.as_str()).await?;
        debug!("Saved theme {} to {:?}", self, path);
        Ok(())
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = VidgrabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            other => Err(VidgrabError::Config(format!("unknown theme: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_toggle_and_parse() {
        assert_eq!(ThemePreference::default(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(" Light\n".parse::<ThemePreference>().unwrap(), ThemePreference::Light);
        assert!("blue".parse::<ThemePreference>().is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_defaults_to_dark() {
        let dir = tempdir().unwrap();
        let theme = ThemePreference::load(&dir.path().join("theme")).await;
        assert_eq!(theme, ThemePreference::Dark);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("theme");

        ThemePreference::Light.save(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "light");
        assert_eq!(ThemePreference::load(&path).await, ThemePreference::Light);
    }

    #[tokio::test]
    async fn test_load_garbage_defaults_to_dark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "solarized").unwrap();
        assert_eq!(ThemePreference::load(&path).await, ThemePreference::Dark);
    }
}
