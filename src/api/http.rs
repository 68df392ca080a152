//! reqwest implementation of the backend seam

use crate::api::models::{DownloadRequest, PreviewRequest, PreviewResponse, RawReply};
use crate::api::traits::Backend;
use crate::utils::config::AppSettings;
use crate::utils::error::{Result, VidgrabError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Url};
use tracing::{debug, info};

/// Talks to the backend over HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build the HTTP client from settings. Fails on a malformed backend URL.
    pub fn new(settings: &AppSettings) -> Result<Self> {
        let base_url = settings.backend_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            VidgrabError::Config(format!("invalid backend URL {:?}: {}", settings.backend_url, e))
        })?;

        let mut builder = Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!("Using backend at {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn id(&self) -> &'static str {
        "http"
    }

    async fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse> {
        let response = self
            .client
            .post(self.endpoint("preview"))
            .json(request)
            .send()
            .await?;

        debug!("POST /preview -> {}", response.status());
        Ok(response.json::<PreviewResponse>().await?)
    }

    async fn download(&self, request: &DownloadRequest) -> Result<RawReply> {
        let response = self
            .client
            .post(self.endpoint("download"))
            .json(request)
            .send()
            .await?;

        debug!("POST /download -> {}", response.status());
        into_raw_reply(response).await
    }

    async fn fetch_file(&self, filename: &str) -> Result<RawReply> {
        let response = self
            .client
            .get(self.endpoint("get_file"))
            .query(&[("filename", filename)])
            .send()
            .await?;

        debug!("GET /get_file -> {}", response.status());
        into_raw_reply(response).await
    }
}

async fn into_raw_reply(response: reqwest::Response) -> Result<RawReply> {
    let status = response.status().as_u16();
    let content_type = header_value(response.headers(), CONTENT_TYPE);
    let content_disposition = header_value(response.headers(), CONTENT_DISPOSITION);
    let body = response.bytes().await?.to_vec();

    Ok(RawReply {
        status,
        content_type,
        content_disposition,
        body,
    })
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
