//! Error handling for vidgrab

use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the download service. Please try again.";

/// Main error type for vidgrab
#[derive(Debug, Error)]
pub enum VidgrabError {
    /// Rejected locally, no request was sent
    #[error("{0}")]
    Validation(String),

    /// Preview request failed or the backend reported a failure
    #[error("{0}")]
    Preview(String),

    /// Download request failed, returned an error body or an empty payload
    #[error("{0}")]
    Download(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VidgrabError {
    /// Message suitable for the status line.
    ///
    /// Validation, preview and download errors already carry user-facing
    /// text; the low-level kinds are mapped to a short explanation.
    pub fn user_message(&self) -> String {
        match self {
            VidgrabError::Validation(message)
            | VidgrabError::Preview(message)
            | VidgrabError::Download(message) => message.clone(),
            VidgrabError::Network(e) if e.is_timeout() => {
                TIMEOUT_MESSAGE.to_string()
            }
            VidgrabError::Network(e) if e.is_connect() => {
                UNREACHABLE_MESSAGE.to_string()
            }
            VidgrabError::Network(_) => {
                "A network error occurred. Please try again.".to_string()
            }
            VidgrabError::Io(e) => format!("Could not access a local file ({})", e.kind()),
            VidgrabError::Serialization(_) => {
                "The download service sent an unexpected response".to_string()
            }
            VidgrabError::Config(message) => format!("Configuration problem: {}", message),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, VidgrabError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, VidgrabError>;
