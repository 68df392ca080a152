//! Partitioning and ordering of advertised formats

use crate::api::models::{FormatDescriptor, FormatKind};
use std::cmp::Ordering;

/// Formats split into the three groups of the selection list, best first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatBuckets {
    pub video_with_audio: Vec<FormatDescriptor>,
    pub video_only: Vec<FormatDescriptor>,
    pub audio_only: Vec<FormatDescriptor>,
}

impl FormatBuckets {
    pub fn len(&self) -> usize {
        self.video_with_audio.len() + self.video_only.len() + self.audio_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All formats in display order
    pub fn iter(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.video_with_audio
            .iter()
            .chain(self.video_only.iter())
            .chain(self.audio_only.iter())
    }
}

/// Put every format into exactly one bucket and sort each bucket.
///
/// Video buckets are ordered by height, then fps, then video bitrate, all
/// descending; audio by audio bitrate descending. Missing values count as 0
/// and ties keep the backend's order.
pub fn classify_and_sort(formats: &[FormatDescriptor]) -> FormatBuckets {
    let mut buckets = FormatBuckets::default();

    for format in formats {
        match format.kind {
            FormatKind::Audio => buckets.audio_only.push(format.clone()),
            FormatKind::Video if format.has_audio() => {
                buckets.video_with_audio.push(format.clone())
            }
            FormatKind::Video => buckets.video_only.push(format.clone()),
        }
    }

    // sort_by is stable
    buckets.video_with_audio.sort_by(compare_video);
    buckets.video_only.sort_by(compare_video);
    buckets.audio_only.sort_by(compare_audio);

    buckets
}

fn compare_video(a: &FormatDescriptor, b: &FormatDescriptor) -> Ordering {
    b.height
        .unwrap_or(0)
        .cmp(&a.height.unwrap_or(0))
        .then_with(|| b.fps.unwrap_or(0).cmp(&a.fps.unwrap_or(0)))
        .then_with(|| {
            b.video_bitrate
                .unwrap_or(0.0)
                .total_cmp(&a.video_bitrate.unwrap_or(0.0))
        })
}

fn compare_audio(a: &FormatDescriptor, b: &FormatDescriptor) -> Ordering {
    b.audio_bitrate
        .unwrap_or(0.0)
        .total_cmp(&a.audio_bitrate.unwrap_or(0.0))
}
