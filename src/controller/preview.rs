//! Preview & download controller
//!
//! Drives the whole request/response lifecycle on a single task: every UI
//! event goes through [`PreviewController::update`], which performs one state
//! transition and leaves the result in the [`ViewModel`].

use crate::api::client::{request_download, request_preview};
use crate::api::models::{FormatDescriptor, FormatKind, PreviewResponse};
use crate::api::traits::Backend;
use crate::controller::messages::{Message, Outcome};
use crate::controller::state::{PreviewDisplay, StatusKind, UiPhase, ViewModel};
use crate::downloader::progress::Checkpoint;
use crate::downloader::saver::save_download;
use crate::formats::{build_option_groups, classify_and_sort, find_option};
use crate::utils::display::{format_duration, format_view_count};
use crate::utils::error::{Result, VidgrabError};
use crate::utils::theme::ThemePreference;
use crate::utils::validate::validate_url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const EMPTY_URL_MESSAGE: &str = "Please enter a YouTube URL";
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL format";
pub const NO_FORMAT_MESSAGE: &str = "Please select a format";
pub const UNKNOWN_FORMAT_MESSAGE: &str = "The selected format is not available for this video";

pub struct PreviewController {
    backend: Arc<dyn Backend>,
    phase: UiPhase,
    view: ViewModel,
    /// Formats of the current preview, dropped on the next submit
    formats: Vec<FormatDescriptor>,
    /// URL the current formats belong to
    previewed_url: Option<String>,
    download_dir: PathBuf,
    theme_path: Option<PathBuf>,
}

impl PreviewController {
    pub fn new(backend: Arc<dyn Backend>, download_dir: PathBuf) -> Self {
        Self {
            backend,
            phase: UiPhase::Idle,
            view: ViewModel::default(),
            formats: Vec::new(),
            previewed_url: None,
            download_dir,
            theme_path: None,
        }
    }

    /// Apply a loaded theme and persist later toggles to `path`.
    pub fn with_theme(mut self, theme: ThemePreference, path: Option<PathBuf>) -> Self {
        self.view.theme = theme;
        self.theme_path = path;
        self
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn phase(&self) -> UiPhase {
        self.phase
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn formats(&self) -> &[FormatDescriptor] {
        &self.formats
    }

    pub fn previewed_url(&self) -> Option<&str> {
        self.previewed_url.as_deref()
    }

    pub fn selected_format(&self) -> Option<&FormatDescriptor> {
        let id = self.view.selected_format_id.as_deref()?;
        self.formats.iter().find(|f| f.format_id == id)
    }

    /// Handle one UI event.
    ///
    /// Errors are also written to the status line and never leave the
    /// controller busy; the returned `Err` is for callers that want to stop.
    pub async fn update(&mut self, message: Message) -> Result<Outcome> {
        debug!("Handling {:?} in {:?}", message, self.phase);

        match message {
            Message::UrlChanged(url) => {
                self.view.url_input = url;
                Ok(Outcome::InputUpdated)
            }
            Message::Submit => self.handle_submit().await,
            Message::FormatSelected(format_id) => self.handle_format_selected(format_id),
            Message::AudioOnlyToggled(enabled) => {
                self.view.extract_audio_only = enabled;
                Ok(Outcome::InputUpdated)
            }
            Message::DownloadClicked => self.handle_download().await,
            Message::HideProgress => Ok(self.handle_hide_progress()),
            Message::ThemeToggled => Ok(self.handle_theme_toggled().await),
        }
    }

    async fn handle_submit(&mut self) -> Result<Outcome> {
        if !self.phase.is_idle() {
            warn!("Submit ignored while {:?}", self.phase);
            return Ok(Outcome::Ignored);
        }

        self.phase = UiPhase::Validating;
        let url = self.view.url_input.trim().to_string();
        if url.is_empty() {
            return Err(self.fail(VidgrabError::Validation(EMPTY_URL_MESSAGE.to_string())));
        }
        if !validate_url(&url) {
            return Err(self.fail(VidgrabError::Validation(INVALID_URL_MESSAGE.to_string())));
        }

        self.formats.clear();
        self.previewed_url = None;
        self.view.clear_preview();
        self.view.set_loading(true);
        self.checkpoint(Checkpoint::PreviewStarted);

        self.phase = UiPhase::FetchingPreview;
        self.checkpoint(Checkpoint::PreviewRequested);
        info!("Requesting preview for {}", url);

        let response = match request_preview(self.backend.as_ref(), &url).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e)),
        };
        self.checkpoint(Checkpoint::PreviewReceived);

        self.phase = UiPhase::RenderingPreview;
        self.checkpoint(Checkpoint::PreviewRendering);
        let format_count = self.render_preview(response);
        self.previewed_url = Some(url);

        self.checkpoint(Checkpoint::PreviewDone);
        self.view.set_loading(false);
        self.phase = UiPhase::Idle;
        Ok(Outcome::PreviewLoaded { format_count })
    }

    fn render_preview(&mut self, response: PreviewResponse) -> usize {
        self.view.preview = Some(PreviewDisplay {
            title: response.title,
            author: response.author,
            thumbnail_url: response.thumbnail_url,
            duration: format_duration(response.duration_seconds),
            views: format_view_count(response.view_count),
        });

        let buckets = classify_and_sort(&response.formats);
        self.view.format_groups = build_option_groups(&buckets);
        self.view.selected_format_id = buckets.iter().next().map(|f| f.format_id.clone());
        self.view.download_enabled = self.view.selected_format_id.is_some();
        self.formats = response.formats;

        debug!(
            "Rendered preview: {} with audio, {} video only, {} audio only",
            buckets.video_with_audio.len(),
            buckets.video_only.len(),
            buckets.audio_only.len()
        );
        buckets.len()
    }

    fn handle_format_selected(&mut self, format_id: String) -> Result<Outcome> {
        if find_option(&self.view.format_groups, &format_id).is_none() {
            warn!("Unknown format {:?} selected", format_id);
            return Err(self.fail(VidgrabError::Validation(UNKNOWN_FORMAT_MESSAGE.to_string())));
        }

        self.view.selected_format_id = Some(format_id.clone());
        Ok(Outcome::FormatSelected(format_id))
    }

    async fn handle_download(&mut self) -> Result<Outcome> {
        if !self.phase.is_idle() {
            warn!("Download ignored while {:?}", self.phase);
            return Ok(Outcome::Ignored);
        }

        // format ids are only valid for the video they were listed for
        let Some(url) = self.previewed_url.clone() else {
            return Err(self.fail(VidgrabError::Validation(NO_FORMAT_MESSAGE.to_string())));
        };
        if self.view.url_input.trim() != url {
            debug!("Input changed since preview, downloading {}", url);
        }
        let Some(format_id) = self.view.selected_format_id.clone() else {
            return Err(self.fail(VidgrabError::Validation(NO_FORMAT_MESSAGE.to_string())));
        };
        let extract_audio_only = self.view.extract_audio_only
            || self
                .selected_format()
                .map(|f| f.kind == FormatKind::Audio)
                .unwrap_or(false);

        self.phase = UiPhase::FetchingDownload;
        self.view.download_enabled = false;
        self.checkpoint(Checkpoint::DownloadStarted);
        self.checkpoint(Checkpoint::DownloadRequested);
        info!(
            "Requesting download of format {} (audio only: {})",
            format_id, extract_audio_only
        );

        let result = match request_download(
            self.backend.as_ref(),
            &url,
            &format_id,
            extract_audio_only,
        )
        .await
        {
            Ok(result) => result,
            Err(e) => return Err(self.fail(e)),
        };
        self.checkpoint(Checkpoint::DownloadReceived);

        self.phase = UiPhase::SavingFile;
        let path = match save_download(&result, &self.download_dir).await {
            Ok(path) => path,
            Err(e) => {
                return Err(self.fail(VidgrabError::Download(format!(
                    "Could not save the file: {}",
                    e
                ))))
            }
        };

        self.checkpoint(Checkpoint::DownloadDone);
        self.view.last_saved = Some(path.clone());
        self.view.download_enabled = true;
        self.phase = UiPhase::Idle;
        Ok(Outcome::Saved(path))
    }

    fn handle_hide_progress(&mut self) -> Outcome {
        if !self.phase.is_idle() || self.view.progress.is_none() {
            return Outcome::Ignored;
        }
        self.view.progress = None;
        Outcome::ProgressHidden
    }

    async fn handle_theme_toggled(&mut self) -> Outcome {
        let theme = self.view.theme.toggled();
        self.view.theme = theme;

        if let Some(path) = &self.theme_path {
            // losing the flag only costs the preference on next start
            if let Err(e) = theme.save(path).await {
                warn!("Failed to persist theme: {}", e);
            }
        }
        Outcome::ThemeChanged(theme)
    }

    fn checkpoint(&mut self, checkpoint: Checkpoint) {
        let kind = if checkpoint.is_final() {
            StatusKind::Success
        } else {
            StatusKind::Info
        };
        self.view.progress = Some(checkpoint.percent());
        self.view.set_status(checkpoint.status_text(), kind);
    }

    /// Show `error`, hide progress and return to an interactive idle state.
    fn fail(&mut self, error: VidgrabError) -> VidgrabError {
        if !error.is_validation() {
            self.view.progress = None;
        }
        self.view.set_status(error.user_message(), StatusKind::Error);
        self.view.set_loading(false);
        self.view.download_enabled = self.view.selected_format_id.is_some();
        self.phase = UiPhase::Idle;
        error
    }
}
