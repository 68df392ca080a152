//! vidgrab library

pub mod api;
pub mod controller;
pub mod downloader;
pub mod formats;
pub mod utils;
pub mod view;

// Re-export main types for easier use
pub use api::{Backend, FormatDescriptor, FormatKind, HttpBackend, PreviewResponse};
pub use controller::{Message, Outcome, PreviewController, UiPhase, ViewModel};
pub use formats::{classify_and_sort, describe_format, FormatBuckets};
pub use utils::{AppSettings, ThemePreference, VidgrabError};
