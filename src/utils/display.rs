//! Human-readable formatting for preview metadata

const FILE_SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a duration in seconds as `M:SS`. Minutes are not wrapped into hours.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a view count: `2.5M views`, `1.5K views`, `999 views`.
pub fn format_view_count(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{}M views", one_decimal_ratio(views, 1_000_000))
    } else if views >= 1_000 {
        format!("{}K views", one_decimal_ratio(views, 1_000))
    } else {
        format!("{} views", views)
    }
}

/// Format a byte count in the largest unit that keeps the value under 1024.
///
/// Absent or zero sizes render as `Unknown size`.
pub fn format_file_size(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "Unknown size".to_string(),
    };

    let mut unit = 0;
    let mut scale = 1u64;
    while unit < FILE_SIZE_UNITS.len() - 1 && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / scale as f64;
    format!("{:.1} {}", round_half_up(value, 1), FILE_SIZE_UNITS[unit])
}

/// `value / divisor` rendered with one decimal, rounding half up.
fn one_decimal_ratio(value: u64, divisor: u64) -> String {
    let tenths = (value as u128 * 10 + divisor as u128 / 2) / divisor as u128;
    format!("{}.{}", tenths / 10, tenths % 10)
}

pub(crate) fn round_half_up(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
