pub mod client;
pub mod http;
pub mod models;
pub mod traits;

pub use client::{request_download, request_preview};
pub use http::HttpBackend;
pub use models::{
    DownloadRequest, DownloadResult, FormatDescriptor, FormatKind, PreviewRequest,
    PreviewResponse, RawReply,
};
pub use traits::Backend;
