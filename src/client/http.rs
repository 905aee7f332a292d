// src/client/http.rs

use std::time::Instant;

use log::{debug, error, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

use crate::client::{ImageUpload, PredictionApi};
use crate::config::ApiConfig;
use crate::decode::decode_json;
use crate::errors::{NeuroError, Result};
use crate::models::{Ack, CreateRecordRequest, HistoryPage, UploadResponse};

/// Talks to the prediction backend over HTTP.
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    config: ApiConfig,
}

impl PredictionClient {
    /// Creates a new `PredictionClient` around an existing `reqwest::Client`.
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Builds its own `reqwest::Client` using the configured timeout.
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::new(client, config))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

/// Turns a non-success response into `ApiError` with the raw body text.
async fn status_error(resp: Response) -> NeuroError {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error body".to_string());
    error!("❌ Error response {}: {}", status, body);
    NeuroError::ApiError {
        status: status.as_u16(),
        body,
    }
}

fn is_created_or_ok(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

impl PredictionApi for PredictionClient {
    async fn create_record(&self, name: &str) -> Result<Ack> {
        info!("📡 Creating record {:?} at {}", name, self.config.base_url);

        let resp = self
            .client
            .post(&self.config.base_url)
            .json(&CreateRecordRequest { name })
            .send()
            .await?;

        if !is_created_or_ok(resp.status()) {
            return Err(status_error(resp).await);
        }

        Ok(Ack {
            message: "Image created successfully".to_string(),
        })
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadResponse> {
        info!(
            "📡 Uploading {} ({}, {} bytes) to {}",
            upload.file_name,
            upload.mime_type,
            upload.bytes.len(),
            self.config.base_url
        );

        let file_part = Part::bytes(upload.bytes)
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| {
                NeuroError::InvalidUpload(format!("mime type {:?}: {e}", upload.mime_type))
            })?;
        let form = Form::new()
            .part("file", file_part)
            .text("name", upload.display_name);

        let start = Instant::now();
        let resp = self
            .client
            .post(&self.config.base_url)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        info!(
            "📥 Upload response status: {} ({}ms)",
            status,
            start.elapsed().as_millis()
        );

        if !is_created_or_ok(status) {
            return Err(status_error(resp).await);
        }

        let body = resp.text().await?;
        debug!("Upload response body: {}", body);

        let parsed: UploadResponse = decode_json(&body)?;
        match &parsed.prediction {
            None => warn!("⚠️  No prediction data in upload response"),
            Some(prediction) => info!("Prediction success: {}", prediction.success),
        }
        Ok(parsed)
    }

    async fn list_past_records(&self) -> Result<HistoryPage> {
        info!("📡 Fetching past records from {}", self.config.base_url);

        let resp = self.client.get(&self.config.base_url).send().await?;
        let status = resp.status();
        info!("📥 Past records response status: {}", status);

        if status != StatusCode::OK {
            return Err(status_error(resp).await);
        }

        let body = resp.text().await?;
        debug!("Past records response body: {}", body);

        let page: HistoryPage = decode_json(&body)?;
        Ok(page)
    }
}
