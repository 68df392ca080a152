//! Download filename handling

/// Default name for an audio-only download without a server-provided name
pub const DEFAULT_AUDIO_FILENAME: &str = "audio.mp3";
/// Default name for a video download without a server-provided name
pub const DEFAULT_VIDEO_FILENAME: &str = "video.mp4";

/// Extract the quoted `filename="..."` value from a `content-disposition` header.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let start = header.find("filename=\"")? + "filename=\"".len();
    let rest = &header[start..];
    let end = rest.find('"')?;
    let name = rest[..end].trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Pick the server-provided name if there is one, otherwise the default for the mode.
pub fn resolve_filename(content_disposition: Option<&str>, extract_audio_only: bool) -> String {
    content_disposition
        .and_then(filename_from_content_disposition)
        .unwrap_or_else(|| {
            if extract_audio_only {
                DEFAULT_AUDIO_FILENAME.to_string()
            } else {
                DEFAULT_VIDEO_FILENAME.to_string()
            }
        })
}

/// Make a server-provided name safe to create inside the download directory.
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];

    let mut sanitized: String = name
        .replace("..", "")
        .chars()
        .map(|c| {
            if invalid_chars.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    // hidden files and trailing dots/spaces (Windows)
    sanitized = sanitized
        .trim()
        .trim_start_matches('.')
        .trim_end_matches('.')
        .trim_end()
        .to_string();

    while sanitized.contains("__") {
        sanitized = sanitized.replace("__", "_");
    }

    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }

    if sanitized.len() > 200 {
        sanitized = truncate_keeping_extension(&sanitized, 200);
    }

    sanitized
}

fn truncate_keeping_extension(name: &str, max_len: usize) -> String {
    let (stem, ext) = match name.rfind('.') {
        Some(pos) if name.len() - pos <= 10 => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    };

    let mut budget = max_len.saturating_sub(ext.len());
    while !stem.is_char_boundary(budget) {
        budget -= 1;
    }
    format!("{}{}", &stem[..budget], ext)
}
