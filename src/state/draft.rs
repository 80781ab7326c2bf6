/// In-progress values of the upload form
///
/// The draft lives only in memory. It is cleared after a successful
/// upload and left alone after a failed one so the owner can retry.
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

/// A file the owner picked for upload. Bytes are read when the upload starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    /// Name sent as the multipart file name
    pub file_name: String,
}

impl SelectedImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = file_name_of(&path);
        Self { path, file_name }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string())
}

/// Snapshot of the draft handed to the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub title: String,
    pub description: String,
    pub image: SelectedImage,
}

/// All upload form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub image: Option<SelectedImage>,
    /// True only while an upload request is in flight
    pub uploading: bool,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the form fields. The uploading flag is left alone.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.image = None;
    }

    /// Validate the draft and mark it as uploading.
    ///
    /// On error nothing changes, so no request should be sent.
    pub fn begin_upload(&mut self) -> Result<UploadRequest> {
        if self.uploading {
            return Err(GalleryError::UploadInProgress);
        }
        if self.title.trim().is_empty() {
            return Err(GalleryError::MissingTitle);
        }
        let image = self.image.clone().ok_or(GalleryError::MissingImage)?;

        self.uploading = true;
        Ok(UploadRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            image,
        })
    }

    /// Apply the outcome of an upload. Returns true when the list should be refetched.
    pub fn finish_upload(&mut self, outcome: &Result<()>) -> bool {
        self.uploading = false;
        match outcome {
            Ok(()) => {
                self.reset();
                true
            }
            Err(_) => false,
        }
    }
}
