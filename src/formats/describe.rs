//! Display labels for formats

use crate::api::models::{FormatDescriptor, FormatKind};
use crate::utils::display::format_file_size;

/// Separator between label tokens
pub const LABEL_SEPARATOR: &str = " • ";

/// Coarse resolution label for a pixel height, `None` below 144p.
pub fn quality_bucket(height: u32) -> Option<&'static str> {
    match height {
        h if h >= 2160 => Some("4K"),
        h if h >= 1440 => Some("2K"),
        h if h >= 1080 => Some("1080p"),
        h if h >= 720 => Some("720p"),
        h if h >= 480 => Some("480p"),
        h if h >= 360 => Some("360p"),
        h if h >= 240 => Some("240p"),
        h if h >= 144 => Some("144p"),
        _ => None,
    }
}

/// Tier label for an audio bitrate in kbps
pub fn audio_tier(bitrate_kbps: f64) -> &'static str {
    if bitrate_kbps >= 192.0 {
        "High Quality"
    } else if bitrate_kbps >= 128.0 {
        "Medium Quality"
    } else {
        "Standard Quality"
    }
}

/// Codec string up to its first '.', e.g. `avc1.64001F` -> `avc1`
pub fn primary_codec(codec: &str) -> &str {
    codec.split('.').next().unwrap_or(codec)
}

/// Build the selection-list label of a format, e.g.
/// `1080p • 60fps • avc1 • 4500kbps • MP4 • (120.3 MB)`.
///
/// Absent fields are left out rather than rendered as placeholders.
pub fn describe_format(format: &FormatDescriptor) -> String {
    let mut tokens: Vec<String> = Vec::with_capacity(6);

    match format.kind {
        FormatKind::Video => {
            if let Some(bucket) = format.height.and_then(quality_bucket) {
                tokens.push(bucket.to_string());
            }
            if let Some(fps) = format.fps {
                tokens.push(format!("{}fps", fps));
            }
            if let Some(codec) = &format.video_codec {
                tokens.push(primary_codec(codec).to_string());
            }
            if let Some(vbr) = format.video_bitrate {
                tokens.push(format!("{}kbps", vbr.round() as u64));
            }
        }
        FormatKind::Audio => {
            // an unknown bitrate ranks as 0 kbps, so audio always carries a tier
            tokens.push(audio_tier(format.audio_bitrate.unwrap_or(0.0)).to_string());
            if let Some(abr) = format.audio_bitrate {
                tokens.push(format!("{}kbps", abr.round() as u64));
            }
            if let Some(codec) = &format.audio_codec {
                tokens.push(primary_codec(codec).to_string());
            }
        }
    }

    if !format.ext.is_empty() {
        tokens.push(format.ext.to_uppercase());
    }
    if let Some(size) = format.filesize.filter(|s| *s > 0) {
        tokens.push(format!("({})", format_file_size(Some(size))));
    }

    tokens.join(LABEL_SEPARATOR)
}
