// src/screens/upload.rs
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::client::{ImageUpload, PredictionApi};
use crate::errors::NeuroError;
use crate::models::UploadResponse;
use crate::navigation::{ResultParams, Screen};

const UNKNOWN_IMAGE_NAME: &str = "Unknown Image";

/// An image the user picked but has not uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub display_name: String,
}

impl SelectedImage {
    /// Without an explicit name, the file name is used.
    pub fn new(path: impl Into<PathBuf>, display_name: Option<&str>) -> Self {
        let path = path.into();
        let display_name = display_name
            .map(str::to_string)
            .or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_IMAGE_NAME.to_string());
        SelectedImage { path, display_name }
    }

    /// The reference handed to the result screen.
    pub fn uri(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    ImageSelected(SelectedImage),
    /// A request is in flight; the upload action is disabled.
    Uploading(SelectedImage),
}

#[derive(Debug)]
pub enum UploadOutcome {
    /// The server accepted the image. `next` is the result screen.
    Completed { next: Screen, notice: String },
    /// Nothing to navigate to; the selection is kept for another try.
    Failed { error: NeuroError },
}

impl UploadOutcome {
    pub fn notice(&self) -> String {
        match self {
            UploadOutcome::Completed { notice, .. } => notice.clone(),
            UploadOutcome::Failed { error } => format!("Upload failed: {error}"),
        }
    }

    pub fn next_screen(&self) -> Option<&Screen> {
        match self {
            UploadOutcome::Completed { next, .. } => Some(next),
            UploadOutcome::Failed { .. } => None,
        }
    }
}

/// Decides where a successful upload leads and what to tell the user.
pub fn outcome_for_response(response: UploadResponse, image_uri: &str) -> UploadOutcome {
    if !response.success {
        warn!(
            "Upload accepted but flagged unsuccessful: {}",
            response.message.as_deref().unwrap_or("no message")
        );
    }

    let Some(prediction) = response.prediction else {
        let reason = response
            .prediction_error
            .unwrap_or_else(|| "No prediction data received from server".to_string());
        return UploadOutcome::Completed {
            next: Screen::Result(ResultParams::image_only(image_uri)),
            notice: format!("Upload successful, but analysis failed: {reason}"),
        };
    };

    match serde_json::to_string(&prediction) {
        Ok(prediction_json) => {
            let notice = if prediction.success {
                "Analysis completed successfully!".to_string()
            } else {
                format!(
                    "Analysis completed with issues: {}",
                    prediction.error.as_deref().unwrap_or("Unknown error")
                )
            };
            UploadOutcome::Completed {
                next: Screen::Result(ResultParams {
                    prediction_json: Some(prediction_json),
                    image_uri: Some(image_uri.to_string()),
                }),
                notice,
            }
        }
        Err(e) => {
            warn!("Could not encode prediction for the result screen: {e}");
            UploadOutcome::Completed {
                next: Screen::Result(ResultParams::image_only(image_uri)),
                notice: "Analysis completed, but display issues occurred".to_string(),
            }
        }
    }
}

/// Reads the image and uploads it. A file that cannot be read fails here,
/// before `api` is called.
pub async fn submit<A: PredictionApi>(api: &A, image: &SelectedImage) -> UploadOutcome {
    let upload = match ImageUpload::from_path(&image.path, &image.display_name).await {
        Ok(upload) => upload,
        Err(error) => return UploadOutcome::Failed { error },
    };

    match api.upload_image(upload).await {
        Ok(response) => outcome_for_response(response, &image.uri()),
        Err(error) => UploadOutcome::Failed { error },
    }
}

/// Upload flow: `Idle -> ImageSelected -> Uploading -> Idle | ImageSelected`.
#[derive(Debug, Default)]
pub struct UploadScreen {
    state: UploadState,
}

impl UploadScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        match &self.state {
            UploadState::Idle => None,
            UploadState::ImageSelected(image) | UploadState::Uploading(image) => Some(image),
        }
    }

    pub fn can_upload(&self) -> bool {
        matches!(self.state, UploadState::ImageSelected(_))
    }

    /// Replaces any previous selection. Ignored while uploading.
    pub fn select_image(&mut self, path: &Path, display_name: Option<&str>) -> bool {
        if matches!(self.state, UploadState::Uploading(_)) {
            return false;
        }
        let image = SelectedImage::new(path, display_name);
        info!("Image selected: {}", image.display_name);
        self.state = UploadState::ImageSelected(image);
        true
    }

    /// Drops the selection. Ignored while uploading.
    pub fn clear_selection(&mut self) -> bool {
        match self.state {
            UploadState::ImageSelected(_) => {
                self.state = UploadState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Moves to `Uploading` and returns the image to send. `None` when there
    /// is nothing selected or an upload is already running.
    pub fn begin_upload(&mut self) -> Option<SelectedImage> {
        let UploadState::ImageSelected(image) = &self.state else {
            return None;
        };
        let image = image.clone();
        self.state = UploadState::Uploading(image.clone());
        Some(image)
    }

    /// Applies the result of [`submit`]. Success clears the selection;
    /// failure keeps it.
    pub fn finish_upload(&mut self, outcome: &UploadOutcome) {
        let UploadState::Uploading(image) = std::mem::take(&mut self.state) else {
            warn!("finish_upload called with no upload in flight");
            return;
        };
        self.state = match outcome {
            UploadOutcome::Completed { .. } => UploadState::Idle,
            UploadOutcome::Failed { .. } => UploadState::ImageSelected(image),
        };
    }

    /// `begin_upload`, `submit` and `finish_upload` in one go.
    pub async fn upload<A: PredictionApi>(&mut self, api: &A) -> Option<UploadOutcome> {
        let image = self.begin_upload()?;
        let outcome = submit(api, &image).await;
        self.finish_upload(&outcome);
        Some(outcome)
    }
}
