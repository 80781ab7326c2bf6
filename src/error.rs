/// Error types for the gallery client
///
/// Errors travel inside iced messages, so every variant carries a
/// rendered string instead of the source error and the enum is `Clone`.
use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Server did not confirm the request")]
    Rejected,

    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Please enter a title!")]
    MissingTitle,

    #[error("Please select an image!")]
    MissingImage,

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Unsupported image file: {0}")]
    UnsupportedImage(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GalleryError::Decode(err.to_string())
        } else {
            GalleryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        GalleryError::Io(err.to_string())
    }
}
