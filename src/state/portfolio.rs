use tracing::{error, info};

use super::data::{Artwork, ArtworkId};
use crate::error::Result;

/// The Portfolio is the local mirror of the server's artwork list.
///
/// It is replaced wholesale on every fetch and only ever mutated
/// locally by removing an item the server confirmed as deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    artworks: Vec<Artwork>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all artworks in server order
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn count(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    pub fn get(&self, id: &ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|art| &art.id == id)
    }

    /// Replace the whole list with a fresh fetch result
    pub fn replace_all(&mut self, artworks: Vec<Artwork>) {
        self.artworks = artworks;
    }

    /// Remove one artwork by id. Returns false if it was not present.
    pub fn remove(&mut self, id: &ArtworkId) -> bool {
        let before = self.artworks.len();
        self.artworks.retain(|art| &art.id != id);
        self.artworks.len() != before
    }

    /// Apply a list fetch. A failed fetch leaves an empty gallery.
    pub fn apply_fetch(&mut self, result: Result<Vec<Artwork>>) {
        match result {
            Ok(artworks) => {
                info!("🖼️  Loaded {} artworks", artworks.len());
                self.replace_all(artworks);
            }
            Err(e) => {
                error!("Error fetching artworks: {}", e);
                self.artworks.clear();
            }
        }
    }

    /// Apply a delete outcome. The item is removed only when the server confirmed it.
    pub fn apply_delete(&mut self, id: &ArtworkId, outcome: &Result<()>) -> bool {
        match outcome {
            Ok(()) => self.remove(id),
            Err(_) => false,
        }
    }
}
