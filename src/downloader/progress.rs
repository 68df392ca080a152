//! Cosmetic progress checkpoints
//!
//! The percentages are a heartbeat for the user, set at fixed points of the
//! request flow. They do not measure transferred bytes.

use std::time::Duration;

/// How long the view keeps a completed progress bar visible
pub const PROGRESS_HIDE_DELAY: Duration = Duration::from_millis(1000);

/// Fixed points of the preview and download flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    PreviewStarted,
    PreviewRequested,
    PreviewReceived,
    PreviewRendering,
    PreviewDone,
    DownloadStarted,
    DownloadRequested,
    DownloadReceived,
    DownloadDone,
}

pub const PREVIEW_CHECKPOINTS: [Checkpoint; 5] = [
    Checkpoint::PreviewStarted,
    Checkpoint::PreviewRequested,
    Checkpoint::PreviewReceived,
    Checkpoint::PreviewRendering,
    Checkpoint::PreviewDone,
];

pub const DOWNLOAD_CHECKPOINTS: [Checkpoint; 4] = [
    Checkpoint::DownloadStarted,
    Checkpoint::DownloadRequested,
    Checkpoint::DownloadReceived,
    Checkpoint::DownloadDone,
];

impl Checkpoint {
    pub fn percent(self) -> u8 {
        match self {
            Checkpoint::PreviewStarted => 10,
            Checkpoint::PreviewRequested => 30,
            Checkpoint::PreviewReceived => 60,
            Checkpoint::PreviewRendering => 80,
            Checkpoint::PreviewDone => 100,
            Checkpoint::DownloadStarted => 10,
            Checkpoint::DownloadRequested => 50,
            Checkpoint::DownloadReceived => 80,
            Checkpoint::DownloadDone => 100,
        }
    }

    /// Status line shown while the checkpoint is current
    pub fn status_text(self) -> &'static str {
        match self {
            Checkpoint::PreviewStarted => "⏳ Please wait while we process your video...",
            Checkpoint::PreviewRequested => "🔍 Fetching video information... Please wait",
            Checkpoint::PreviewReceived => "⚙️ Processing video details... This may take a moment",
            Checkpoint::PreviewRendering => "📥 Loading video preview... Almost done!",
            Checkpoint::PreviewDone => {
                "✅ Video information loaded successfully! Select quality and click Download to start."
            }
            Checkpoint::DownloadStarted => "⏳ Preparing download... Please wait",
            Checkpoint::DownloadRequested => "📥 Downloading video... This may take a while",
            Checkpoint::DownloadReceived => "⚙️ Processing video file... Almost done!",
            Checkpoint::DownloadDone => "✅ Download completed successfully!",
        }
    }

    pub fn is_final(self) -> bool {
        self.percent() == 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_percentages() {
        let percents: Vec<u8> = PREVIEW_CHECKPOINTS.iter().map(|c| c.percent()).collect();
        assert_eq!(percents, vec![10, 30, 60, 80, 100]);
    }

    #[test]
    fn test_download_percentages() {
        let percents: Vec<u8> = DOWNLOAD_CHECKPOINTS.iter().map(|c| c.percent()).collect();
        assert_eq!(percents, vec![10, 50, 80, 100]);
    }

    #[test]
    fn test_only_last_checkpoint_is_final() {
        assert!(Checkpoint::PreviewDone.is_final());
        assert!(Checkpoint::DownloadDone.is_final());
        assert!(!Checkpoint::DownloadReceived.is_final());
    }
}
