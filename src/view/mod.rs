//! Terminal rendering of the controller's view model

pub mod palette;

use crate::controller::{StatusKind, ViewModel};
use crate::formats::options::{flatten_options, FormatOption};
use palette::Palette;
use std::fmt::Write;

const PROGRESS_WIDTH: usize = 30;

/// Status line, e.g. `❌ Invalid YouTube URL format`
pub fn render_status(view: &ViewModel, palette: &Palette) -> Option<String> {
    let status = view.status.as_ref()?;
    let (color, prefix) = match status.kind {
        StatusKind::Info => (palette.info, ""),
        StatusKind::Success => (palette.success, ""),
        StatusKind::Error => (palette.error, "❌ "),
    };
    Some(palette.paint(color, &format!("{}{}", prefix, status.text)))
}

/// `[#########.....]  30%`, or nothing while hidden
pub fn render_progress(view: &ViewModel, palette: &Palette) -> Option<String> {
    let percent = view.progress? as usize;
    let filled = PROGRESS_WIDTH * percent.min(100) / 100;
    let bar = format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        percent
    );
    Some(palette.paint(palette.accent, &bar))
}

/// Metadata block and the numbered, grouped format list
pub fn render_preview(view: &ViewModel, palette: &Palette) -> Option<String> {
    let preview = view.preview.as_ref()?;
    let mut out = String::new();

    let _ = writeln!(out, "{}", palette.paint(palette.title, &preview.title));
    let _ = writeln!(out, "  by {}", preview.author);
    let _ = writeln!(out, "  {}  |  {}", preview.duration, preview.views);
    if !preview.thumbnail_url.is_empty() {
        let _ = writeln!(out, "  thumbnail: {}", preview.thumbnail_url);
    }

    let mut number = 1;
    for group in &view.format_groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", palette.paint(palette.accent, group.label));
        for option in &group.options {
            let marker = if view.selected_format_id.as_deref() == Some(option.format_id.as_str()) {
                '*'
            } else {
                ' '
            };
            let _ = writeln!(
                out,
                " {} {:>3}) {}  [{}]",
                marker, number, option.label, option.format_id
            );
            number += 1;
        }
    }

    if view.format_groups.is_empty() {
        let _ = writeln!(out, "\n  No downloadable formats were returned.");
    }

    Some(out)
}

/// The option shown as number `number` by [`render_preview`] (1-based)
pub fn option_by_number(view: &ViewModel, number: usize) -> Option<&FormatOption> {
    number
        .checked_sub(1)
        .and_then(|index| flatten_options(&view.format_groups).nth(index))
}
