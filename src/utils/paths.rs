//! Platform directory resolution
//!
//! Everything is resolved from the platform conventions exposed by `dirs`
//! rather than the working directory, so the binary behaves the same no matter
//! where it is launched from.

use std::path::PathBuf;
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "vidgrab";

/// Directory holding the settings file and the theme flag.
///
/// Returns `<config dir>/vidgrab/` (for example `~/.config/vidgrab/`).
/// Does not create the directory; writers create it on save.
pub fn get_app_config_dir() -> PathBuf {
    let dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| {
            warn!("Could not determine a config directory, using the temp dir");
            std::env::temp_dir()
        })
        .join(APP_DIR_NAME);

    debug!("App config directory: {:?}", dir);
    dir
}

pub fn get_settings_path() -> PathBuf {
    get_app_config_dir().join("settings.json")
}

pub fn get_theme_path() -> PathBuf {
    get_app_config_dir().join("theme")
}

/// Platform Downloads directory, falling back to `~/Downloads`.
pub fn get_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using the temp dir");
            std::env::temp_dir()
        })
}
