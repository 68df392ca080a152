//! Wire types exchanged with the preview/download backend

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /preview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub url: String,
}

/// Body returned by `POST /preview`.
///
/// Failure bodies only carry `success` and `message`, so every field defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewResponse {
    pub success: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub message: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(rename = "thumbnail", deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(rename = "duration", deserialize_with = "lenient_count")]
    pub duration_seconds: u64,
    #[serde(rename = "views", deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub formats: Vec<FormatDescriptor>,
}

/// Whether a format carries a video stream or is audio only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    #[default]
    Video,
    Audio,
}

/// One selectable encoding/container variant advertised by the backend.
///
/// Absent values are always `None`: the backend's `0` and `"none"` sentinels
/// are normalized away on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFormat")]
pub struct FormatDescriptor {
    pub format_id: String,
    #[serde(rename = "type")]
    pub kind: FormatKind,
    pub ext: String,
    #[serde(rename = "vcodec", skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(rename = "acodec", skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    /// Video bitrate in kbps
    #[serde(rename = "vbr", skip_serializing_if = "Option::is_none")]
    pub video_bitrate: Option<f64>,
    /// Audio bitrate in kbps
    #[serde(rename = "abr", skip_serializing_if = "Option::is_none")]
    pub audio_bitrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_note: Option<String>,
}

impl FormatDescriptor {
    pub fn is_audio_only(&self) -> bool {
        self.kind == FormatKind::Audio
    }

    /// True when the format has a real audio codec.
    pub fn has_audio(&self) -> bool {
        self.audio_codec.is_some()
    }
}

/// Format exactly as the backend sends it
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFormat {
    #[serde(deserialize_with = "null_as_default")]
    format_id: String,
    #[serde(rename = "type", deserialize_with = "non_empty_string")]
    kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    ext: String,
    #[serde(deserialize_with = "non_empty_string")]
    vcodec: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    acodec: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    height: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    fps: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    vbr: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    abr: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    filesize: Option<f64>,
    #[serde(deserialize_with = "non_empty_string")]
    format_note: Option<String>,
}

impl From<RawFormat> for FormatDescriptor {
    fn from(raw: RawFormat) -> Self {
        let video_codec = raw.vcodec.filter(|c| !is_none_codec(c));
        let audio_codec = raw.acodec.filter(|c| !is_none_codec(c));
        let height = positive(raw.height).map(|h| h.round() as u32);

        let kind = match raw.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("video") => FormatKind::Video,
            Some("audio") => FormatKind::Audio,
            // older backends omit `type`
            _ if video_codec.is_some() || height.is_some() => FormatKind::Video,
            _ => FormatKind::Audio,
        };

        Self {
            format_id: raw.format_id,
            kind,
            ext: raw.ext,
            video_codec,
            audio_codec,
            height,
            fps: positive(raw.fps).map(|f| f.round() as u32),
            video_bitrate: positive(raw.vbr),
            audio_bitrate: positive(raw.abr),
            filesize: positive(raw.filesize).map(|s| s.round() as u64),
            format_note: raw.format_note,
        }
    }
}

fn is_none_codec(codec: &str) -> bool {
    codec.eq_ignore_ascii_case("none")
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Body of `POST /download`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub format_id: String,
    #[serde(rename = "extract_audio")]
    pub extract_audio_only: bool,
}

/// A downloaded file ready to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadResult {
    pub bytes: Vec<u8>,
    /// Name suggested by the server, or the default for the download mode
    pub filename: String,
}

/// Transport-level reply of the download and file endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false)
    }
}

/// JSON body the download endpoint sends instead of a file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DownloadReplyBody {
    pub success: Option<bool>,
    #[serde(deserialize_with = "non_empty_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub filename: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Accepts integers, floats, numeric strings and null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Number>::deserialize(deserializer)? {
        Some(Number::Int(i)) => Some(i as f64),
        Some(Number::Float(f)) => Some(f),
        Some(Number::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_number(deserializer)?;
    Ok(positive(value).map(|v| v.floor() as u64).unwrap_or(0))
}
