// src/errors.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;

#[derive(Error, Debug)]
pub enum NeuroError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Response was received but could not be read: {0}")]
    Decode(#[from] DecodeError),

    #[error("Could not read image file {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse grouping of failures, used by screens to pick their messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// The server could not be reached (connect error, timeout).
    Transport,
    /// The server answered with a non-success status.
    Status,
    /// Bytes arrived but did not have the expected shape.
    Decode,
    /// Nothing left the device: bad input, unreadable file, config.
    Local,
}

impl NeuroError {
    pub fn category(&self) -> FailureCategory {
        match self {
            NeuroError::Request(_) => FailureCategory::Transport,
            NeuroError::ApiError { .. } => FailureCategory::Status,
            NeuroError::Decode(_) => FailureCategory::Decode,
            NeuroError::ImageRead { .. }
            | NeuroError::InvalidUpload(_)
            | NeuroError::FileRead(_)
            | NeuroError::TomlParse(_)
            | NeuroError::Config(_) => FailureCategory::Local,
        }
    }

    /// Whether asking the user to try again can plausibly help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            FailureCategory::Transport | FailureCategory::Status
        )
    }
}

pub type Result<T> = std::result::Result<T, NeuroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_code_and_body() {
        let err = NeuroError::ApiError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 500: boom");
        assert_eq!(err.category(), FailureCategory::Status);
        assert!(err.is_retryable());
    }

    #[test]
    fn image_read_is_local() {
        let err = NeuroError::ImageRead {
            path: PathBuf::from("/missing/scan.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/scan.png"));
        assert_eq!(err.category(), FailureCategory::Local);
        assert!(!err.is_retryable());
    }

    #[test]
    fn decode_failure_is_not_retryable() {
        let err = NeuroError::from(crate::decode::decode_json::<u8>("<html>").unwrap_err());
        assert_eq!(err.category(), FailureCategory::Decode);
        assert!(!err.is_retryable());
    }
}
