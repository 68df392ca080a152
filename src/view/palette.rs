//! ANSI color palettes for the dark and light themes

use crate::utils::theme::ThemePreference;

// --- Dark palette ---
const DARK_INFO: &str = "\x1b[38;5;117m"; // Sky 300
const DARK_SUCCESS: &str = "\x1b[38;5;78m"; // Emerald 400
const DARK_ERROR: &str = "\x1b[38;5;203m"; // Red 400
const DARK_ACCENT: &str = "\x1b[38;5;141m"; // Purple 400
const DARK_TITLE: &str = "\x1b[1;97m"; // Bold white

// --- Light palette ---
const LIGHT_INFO: &str = "\x1b[38;5;25m"; // Blue 700
const LIGHT_SUCCESS: &str = "\x1b[38;5;28m"; // Emerald 700
const LIGHT_ERROR: &str = "\x1b[38;5;160m"; // Red 600
const LIGHT_ACCENT: &str = "\x1b[38;5;61m"; // Indigo 500
const LIGHT_TITLE: &str = "\x1b[1;30m"; // Bold black

const RESET: &str = "\x1b[0m";

/// Escape sequences used by the terminal view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub info: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub accent: &'static str,
    pub title: &'static str,
}

impl Palette {
    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Dark => Self {
                info: DARK_INFO,
                success: DARK_SUCCESS,
                error: DARK_ERROR,
                accent: DARK_ACCENT,
                title: DARK_TITLE,
            },
            ThemePreference::Light => Self {
                info: LIGHT_INFO,
                success: LIGHT_SUCCESS,
                error: LIGHT_ERROR,
                accent: LIGHT_ACCENT,
                title: LIGHT_TITLE,
            },
        }
    }

    /// No escape codes, for pipes and tests
    pub fn plain() -> Self {
        Self {
            info: "",
            success: "",
            error: "",
            accent: "",
            title: "",
        }
    }

    pub fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", color, text, RESET)
        }
    }
}
