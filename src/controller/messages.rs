use crate::utils::theme::ThemePreference;
use std::path::PathBuf;

/// UI events fed into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Input events
    UrlChanged(String),
    Submit,

    // Selection
    FormatSelected(String),
    AudioOnlyToggled(bool),

    // Download
    DownloadClicked,

    // Cosmetic
    HideProgress,
    ThemeToggled,
}

/// What a handled event did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Event arrived while a request was in flight, or had nothing to do
    Ignored,
    InputUpdated,
    PreviewLoaded { format_count: usize },
    FormatSelected(String),
    ProgressHidden,
    Saved(PathBuf),
    ThemeChanged(ThemePreference),
}
