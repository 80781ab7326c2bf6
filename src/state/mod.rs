/// State management module
///
/// This module handles all client-side state:
/// - Artwork records as returned by the API (data.rs)
/// - The local mirror of the artwork list (portfolio.rs)
/// - The upload form draft (draft.rs)

pub mod data;
pub mod draft;
pub mod portfolio;

pub use data::{Artwork, ArtworkId};
pub use draft::{FormDraft, SelectedImage, UploadRequest};
pub use portfolio::Portfolio;
