/// Shared data structures for the application state
///
/// These structs mirror what the gallery API returns and flow
/// from the HTTP layer into the view.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned artwork identifier. Servers hand out either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtworkId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtworkId::Number(n) => write!(f, "{}", n),
            ArtworkId::Text(s) => f.write_str(s),
        }
    }
}

/// Represents a single artwork held by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    /// May be missing or null; shown as empty text
    #[serde(default)]
    pub description: Option<String>,
    /// Absolute URL, or a path relative to the API base
    pub url: String,
}

impl Artwork {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
