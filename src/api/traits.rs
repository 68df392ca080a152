use crate::api::models::{DownloadRequest, PreviewRequest, PreviewResponse, RawReply};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The backend service that resolves a video URL into metadata and files.
///
/// Implementations only move bytes; interpreting success flags, error bodies
/// and empty payloads is done by [`crate::api::client`], so every
/// implementation gets the same semantics.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Identifier used in logs (e.g. "http")
    fn id(&self) -> &'static str;

    /// `POST /preview`. The JSON body is returned whatever the HTTP status,
    /// since failures are reported as `success: false` bodies.
    async fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse>;

    /// `POST /download`
    async fn download(&self, request: &DownloadRequest) -> Result<RawReply>;

    /// `GET /get_file?filename=...`, used when the download endpoint answers
    /// with a JSON hand-off instead of the file itself.
    async fn fetch_file(&self, filename: &str) -> Result<RawReply>;
}
