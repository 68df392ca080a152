//! Grouped selection list built from classified formats

use crate::api::models::{FormatDescriptor, FormatKind};
use crate::formats::classify::FormatBuckets;
use crate::formats::describe::describe_format;
use serde::Serialize;

pub const VIDEO_WITH_AUDIO_LABEL: &str = "Video + Audio";
pub const VIDEO_ONLY_LABEL: &str = "Video Only";
pub const AUDIO_ONLY_LABEL: &str = "Audio Only";

/// One entry of the selection list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatOption {
    pub format_id: String,
    pub label: String,
    pub kind: FormatKind,
}

impl From<&FormatDescriptor> for FormatOption {
    fn from(format: &FormatDescriptor) -> Self {
        Self {
            format_id: format.format_id.clone(),
            label: describe_format(format),
            kind: format.kind,
        }
    }
}

/// A labelled group of options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatOptionGroup {
    pub label: &'static str,
    pub options: Vec<FormatOption>,
}

/// Groups in display order; empty groups are left out.
pub fn build_option_groups(buckets: &FormatBuckets) -> Vec<FormatOptionGroup> {
    [
        (VIDEO_WITH_AUDIO_LABEL, &buckets.video_with_audio),
        (VIDEO_ONLY_LABEL, &buckets.video_only),
        (AUDIO_ONLY_LABEL, &buckets.audio_only),
    ]
    .into_iter()
    .filter(|(_, formats)| !formats.is_empty())
    .map(|(label, formats)| FormatOptionGroup {
        label,
        options: formats.iter().map(FormatOption::from).collect(),
    })
    .collect()
}

/// Options across all groups, in display order
pub fn flatten_options(groups: &[FormatOptionGroup]) -> impl Iterator<Item = &FormatOption> {
    groups.iter().flat_map(|group| group.options.iter())
}

pub fn find_option<'a>(groups: &'a [FormatOptionGroup], format_id: &str) -> Option<&'a FormatOption> {
    flatten_options(groups).find(|option| option.format_id == format_id)
}
