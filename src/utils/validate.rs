//! Client-side URL check

/// Host markers accepted for the supported platform
pub const HOST_MARKERS: [&str; 2] = ["youtube.com/", "youtu.be/"];

/// True when the URL is non-empty and contains one of the host markers.
///
/// Deliberately shallow: anything containing a marker passes, the backend
/// does the real parsing.
pub fn validate_url(url: &str) -> bool {
    !url.is_empty() && HOST_MARKERS.iter().any(|marker| url.contains(marker))
}
