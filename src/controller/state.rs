//! Display state owned by the controller

use crate::formats::FormatOptionGroup;
use crate::utils::theme::ThemePreference;
use serde::Serialize;
use std::path::PathBuf;

pub const SUBMIT_LABEL_IDLE: &str = "Convert";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";

/// Where the controller is in its request flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiPhase {
    #[default]
    Idle,
    Validating,
    FetchingPreview,
    RenderingPreview,
    FetchingDownload,
    SavingFile,
}

impl UiPhase {
    pub fn is_idle(self) -> bool {
        self == UiPhase::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

/// Formatted metadata of the previewed video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDisplay {
    pub title: String,
    pub author: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub views: String,
}

/// Every field a view layer needs to draw the page.
///
/// Only the controller mutates it; views read it after each event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub url_input: String,
    pub status: Option<StatusLine>,
    /// `None` while the progress bar is hidden
    pub progress: Option<u8>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub download_enabled: bool,
    /// Set only by a successful preview
    pub preview: Option<PreviewDisplay>,
    pub format_groups: Vec<FormatOptionGroup>,
    pub selected_format_id: Option<String>,
    pub extract_audio_only: bool,
    pub theme: ThemePreference,
    pub last_saved: Option<PathBuf>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            status: None,
            progress: None,
            submit_enabled: true,
            submit_label: SUBMIT_LABEL_IDLE,
            download_enabled: false,
            preview: None,
            format_groups: Vec::new(),
            selected_format_id: None,
            extract_audio_only: false,
            theme: ThemePreference::default(),
            last_saved: None,
        }
    }
}

impl ViewModel {
    pub fn preview_visible(&self) -> bool {
        self.preview.is_some()
    }

    pub fn progress_visible(&self) -> bool {
        self.progress.is_some()
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusLine {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.submit_enabled = !loading;
        self.submit_label = if loading {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        };
    }

    pub(crate) fn clear_preview(&mut self) {
        self.preview = None;
        self.format_groups.clear();
        self.selected_format_id = None;
        self.download_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_interactive_and_empty() {
        let view = ViewModel::default();
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
        assert!(!view.download_enabled);
        assert!(!view.preview_visible());
        assert!(!view.progress_visible());
        assert_eq!(view.theme, ThemePreference::Dark);
    }

    #[test]
    fn test_loading_toggles_submit_button() {
        let mut view = ViewModel::default();
        view.set_loading(true);
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
        view.set_loading(false);
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
    }
}
