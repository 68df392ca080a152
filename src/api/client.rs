//! Interpretation of backend replies
//!
//! Turns raw preview bodies and download replies into either usable values or
//! user-facing [`VidgrabError::Preview`] / [`VidgrabError::Download`] errors.

use crate::api::models::{
    DownloadReplyBody, DownloadRequest, DownloadResult, PreviewRequest, PreviewResponse, RawReply,
};
use crate::api::traits::Backend;
use crate::utils::error::{Result, VidgrabError};
use crate::utils::filename::{filename_from_content_disposition, resolve_filename};
use tracing::{debug, error, info, warn};

pub const PREVIEW_FALLBACK_MESSAGE: &str = "Error loading video information. Please try again.";
pub const DOWNLOAD_FALLBACK_MESSAGE: &str = "Download failed";
pub const EMPTY_PAYLOAD_MESSAGE: &str = "The downloaded file is empty";
pub const MISSING_FILE_MESSAGE: &str = "The download service did not return a file";

/// Ask the backend for metadata and formats of `url`.
///
/// Transport failures and `success: false` bodies both become
/// [`VidgrabError::Preview`], carrying the backend's message when it sent one.
pub async fn request_preview(backend: &dyn Backend, url: &str) -> Result<PreviewResponse> {
    let request = PreviewRequest {
        url: url.to_string(),
    };

    let response = backend.preview(&request).await.map_err(|e| {
        error!("Preview request via {} failed: {}", backend.id(), e);
        VidgrabError::Preview(transport_message(&e, PREVIEW_FALLBACK_MESSAGE))
    })?;

    if !response.success {
        let message = response
            .message
            .unwrap_or_else(|| PREVIEW_FALLBACK_MESSAGE.to_string());
        warn!("Backend rejected preview: {}", message);
        return Err(VidgrabError::Preview(message));
    }

    debug!(
        "Preview for {:?}: {} formats",
        response.title,
        response.formats.len()
    );
    Ok(response)
}

/// Ask the backend for the file of `format_id` and resolve its name.
///
/// The reply is negotiated on its content type: a JSON body is either an
/// error or a hand-off naming a file to fetch from `/get_file`; anything else
/// is the file itself. Empty payloads are always rejected.
pub async fn request_download(
    backend: &dyn Backend,
    url: &str,
    format_id: &str,
    extract_audio_only: bool,
) -> Result<DownloadResult> {
    let request = DownloadRequest {
        url: url.to_string(),
        format_id: format_id.to_string(),
        extract_audio_only,
    };

    let reply = backend
        .download(&request)
        .await
        .map_err(|e| download_transport_error(backend, e))?;

    if !reply.is_json() {
        return file_reply_into_result(reply, extract_audio_only, None);
    }

    let body = parse_reply_body(&reply);
    if !reply.is_success() || body.success == Some(false) {
        return Err(reply_error(&reply, body));
    }

    let Some(handoff) = body.filename else {
        warn!("Download endpoint answered with JSON but no filename");
        return Err(VidgrabError::Download(MISSING_FILE_MESSAGE.to_string()));
    };

    info!("Fetching prepared file {:?}", handoff);
    let file_reply = backend
        .fetch_file(&handoff)
        .await
        .map_err(|e| download_transport_error(backend, e))?;

    file_reply_into_result(file_reply, extract_audio_only, Some(handoff))
}

fn file_reply_into_result(
    reply: RawReply,
    extract_audio_only: bool,
    handoff_name: Option<String>,
) -> Result<DownloadResult> {
    if !reply.is_success() {
        let body = parse_reply_body(&reply);
        return Err(reply_error(&reply, body));
    }

    if reply.is_json() {
        let body = parse_reply_body(&reply);
        warn!("Expected a file but got JSON: {:?}", body.message);
        return Err(VidgrabError::Download(
            body.message
                .unwrap_or_else(|| MISSING_FILE_MESSAGE.to_string()),
        ));
    }

    if reply.body.is_empty() {
        warn!("Download returned an empty payload (HTTP {})", reply.status);
        return Err(VidgrabError::Download(EMPTY_PAYLOAD_MESSAGE.to_string()));
    }

    let filename = reply
        .content_disposition
        .as_deref()
        .and_then(filename_from_content_disposition)
        .or(handoff_name)
        .unwrap_or_else(|| resolve_filename(None, extract_audio_only));

    debug!("Downloaded {} bytes as {:?}", reply.body.len(), filename);
    Ok(DownloadResult {
        bytes: reply.body,
        filename,
    })
}

/// Error bodies are best effort: anything unparsable yields an empty body.
fn parse_reply_body(reply: &RawReply) -> DownloadReplyBody {
    serde_json::from_slice(&reply.body).unwrap_or_default()
}

fn reply_error(reply: &RawReply, body: DownloadReplyBody) -> VidgrabError {
    let message = body.message.unwrap_or_else(|| {
        if reply.is_success() {
            DOWNLOAD_FALLBACK_MESSAGE.to_string()
        } else {
            format!("{} (HTTP {})", DOWNLOAD_FALLBACK_MESSAGE, reply.status)
        }
    });
    warn!("Download rejected: {}", message);
    VidgrabError::Download(message)
}

fn download_transport_error(backend: &dyn Backend, e: VidgrabError) -> VidgrabError {
    error!("Download request via {} failed: {}", backend.id(), e);
    VidgrabError::Download(transport_message(&e, DOWNLOAD_FALLBACK_MESSAGE))
}

fn transport_message(err: &VidgrabError, fallback: &str) -> String {
    match err {
        VidgrabError::Network(e) if e.is_timeout() || e.is_connect() => err.user_message(),
        VidgrabError::Preview(message) | VidgrabError::Download(message) => message.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(status: u16, body: &[u8]) -> RawReply {
        RawReply {
            status,
            content_type: Some("video/mp4".into()),
            content_disposition: None,
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_binary_reply_uses_default_name() {
        let result = file_reply_into_result(binary(200, b"data"), false, None).unwrap();
        assert_eq!(result.filename, "video.mp4");
        assert_eq!(result.bytes, b"data");

        let result = file_reply_into_result(binary(200, b"data"), true, None).unwrap();
        assert_eq!(result.filename, "audio.mp3");
    }

    #[test]
    fn test_header_name_beats_handoff_name() {
        let mut reply = binary(200, b"data");
        reply.content_disposition = Some("attachment; filename=\"Clip.webm\"".into());
        let result = file_reply_into_result(reply, false, Some("other.mp4".into())).unwrap();
        assert_eq!(result.filename, "Clip.webm");

        let result = file_reply_into_result(binary(200, b"x"), false, Some("other.mp4".into()))
            .unwrap();
        assert_eq!(result.filename, "other.mp4");
    }

    #[test]
    fn test_empty_payload_rejected_for_any_status() {
        for status in [200, 204, 206] {
            let err = file_reply_into_result(binary(status, b""), false, None).unwrap_err();
            assert!(matches!(err, VidgrabError::Download(ref m) if m == EMPTY_PAYLOAD_MESSAGE));
        }
        let err = file_reply_into_result(binary(500, b""), false, None).unwrap_err();
        assert!(matches!(err, VidgrabError::Download(_)));
    }

    #[test]
    fn test_failure_status_uses_error_body_message() {
        let reply = binary(400, br#"{"success": false, "message": "Video unavailable"}"#);
        let err = file_reply_into_result(reply, false, None).unwrap_err();
        assert_eq!(err.to_string(), "Video unavailable");

        let err = file_reply_into_result(binary(502, b"<html>bad gateway</html>"), false, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Download failed (HTTP 502)");
    }
}
