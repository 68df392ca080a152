pub mod classify;
pub mod describe;
pub mod options;

pub use classify::{classify_and_sort, FormatBuckets};
pub use describe::{audio_tier, describe_format, quality_bucket};
pub use options::{build_option_groups, find_option, FormatOption, FormatOptionGroup};
