// src/client/mod.rs

use std::path::Path;

use log::debug;

use crate::errors::{NeuroError, Result};
use crate::models::{Ack, HistoryPage, UploadResponse};

pub mod http;

pub use http::PredictionClient;

pub const DEFAULT_FILE_NAME: &str = "image.jpg";
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// The three operations the app performs against the prediction backend.
///
/// Every call resolves to an explicit `Result`; nothing is retried here.
/// Screens hold a `&impl PredictionApi`, so tests can substitute a fake.
pub trait PredictionApi: Send + Sync {
    /// Creates an empty record with the given display name.
    fn create_record(&self, name: &str) -> impl std::future::Future<Output = Result<Ack>> + Send;

    /// Uploads one image and returns the stored record and its prediction.
    fn upload_image(
        &self,
        upload: ImageUpload,
    ) -> impl std::future::Future<Output = Result<UploadResponse>> + Send;

    /// Lists every past upload.
    fn list_past_records(&self) -> impl std::future::Future<Output = Result<HistoryPage>> + Send;
}

/// An image, already in memory, ready to be sent as a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
    pub display_name: String,
}

impl ImageUpload {
    /// Blank file names become `image.jpg`; a missing mime type becomes
    /// `image/jpeg`.
    pub fn new(
        bytes: Vec<u8>,
        file_name: &str,
        mime_type: Option<&str>,
        display_name: &str,
    ) -> Self {
        let file_name = if file_name.trim().is_empty() {
            DEFAULT_FILE_NAME.to_string()
        } else {
            file_name.to_string()
        };
        ImageUpload {
            bytes,
            file_name,
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
            display_name: display_name.to_string(),
        }
    }

    /// Reads `path` from disk. Fails with [`NeuroError::ImageRead`] when the
    /// file cannot be opened, before anything touches the network.
    pub async fn from_path(path: &Path, display_name: &str) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| NeuroError::ImageRead {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(path).first();
        debug!(
            "Read {} bytes from {} ({})",
            bytes.len(),
            path.display(),
            mime.as_ref().map(|m| m.essence_str()).unwrap_or(DEFAULT_MIME_TYPE)
        );

        Ok(Self::new(
            bytes,
            &file_name,
            mime.as_ref().map(|m| m.essence_str()),
            display_name,
        ))
    }
}
