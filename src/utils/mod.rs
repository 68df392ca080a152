//! Utility modules for error handling, configuration and formatting

pub mod config;
pub mod display;
pub mod error;
pub mod filename;
pub mod paths;
pub mod theme;
pub mod validate;

// Re-export for convenience
pub use config::AppSettings;
pub use display::{format_duration, format_file_size, format_view_count};
pub use error::VidgrabError;
pub use paths::{get_app_config_dir, get_downloads_dir, get_settings_path, get_theme_path};
pub use theme::ThemePreference;
pub use validate::validate_url;
