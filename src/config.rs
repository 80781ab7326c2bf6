/// Client configuration and owner-mode resolution
///
/// Configuration is layered, lowest precedence first:
/// - `<config_dir>/pixel-gallery/config.json` (optional)
/// - `.env` in the working directory (loaded by `main`)
/// - `GALLERY_*` environment variables
///
/// Owner mode only decides which controls are shown and whether a bearer
/// token is attached. It is not access control: the server must reject
/// unauthorized uploads and deletes on its own.
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{GalleryError, Result};

const DEFAULT_HEADING: &str = "My Pixel Art Portfolio";
const DEFAULT_TAGLINE: &str = "Here you'll see my pixel art 😸";

/// Which bearer credential applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    Development,
}

impl BuildMode {
    /// Development for debug builds, production for release builds
    fn from_build() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(BuildMode::Production),
            "development" | "dev" => Ok(BuildMode::Development),
            other => Err(GalleryError::Config(format!("unknown GALLERY_MODE '{}'", other))),
        }
    }
}

/// Contents of the optional config file. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub is_owner: Option<bool>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub dev_auth_token: Option<String>,
    #[serde(default)]
    pub mode: Option<BuildMode>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl ConfigFile {
    /// Location of the config file:
    /// - Linux: ~/.config/pixel-gallery/config.json
    /// - macOS: ~/Library/Application Support/pixel-gallery/config.json
    /// - Windows: %APPDATA%\pixel-gallery\config.json
    pub fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("pixel-gallery");
        path.push("config.json");
        Some(path)
    }

    /// Read the config file if it exists. A missing file is not an error.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        serde_json::from_str(&raw)
            .map_err(|e| GalleryError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Everything the gallery view needs to know at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Base address of the API, without a trailing slash
    pub api_base: String,
    /// Show upload and delete controls
    pub is_owner: bool,
    /// Bearer credential attached to mutating requests
    pub auth_token: Option<String>,
    pub heading: String,
    pub tagline: String,
}

impl GalleryConfig {
    /// Build a configuration from explicit values.
    pub fn new(api_base: &str, is_owner: bool, auth_token: Option<String>) -> Result<Self> {
        let api_base = normalize_base(api_base)?;
        let auth_token = auth_token.filter(|t| !t.trim().is_empty());

        if is_owner && auth_token.is_none() {
            warn!("Owner mode is enabled without a credential; mutating requests will be unauthenticated");
        }

        Ok(Self {
            api_base,
            is_owner,
            auth_token,
            heading: DEFAULT_HEADING.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
        })
    }

    /// Load from the config file and the process environment.
    pub fn load() -> Result<Self> {
        let file = ConfigFile::load()?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a config file with environment lookups. Environment wins.
    pub fn from_sources(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_base = env("GALLERY_API_BASE")
            .or(file.api_base)
            .ok_or_else(|| GalleryError::Config("GALLERY_API_BASE is not set".to_string()))?;

        let mode = match env("GALLERY_MODE") {
            Some(value) => BuildMode::parse(&value)?,
            None => file.mode.unwrap_or_else(BuildMode::from_build),
        };

        let auth_token = match mode {
            BuildMode::Production => env("GALLERY_AUTH_TOKEN").or(file.auth_token),
            BuildMode::Development => env("GALLERY_DEV_AUTH_TOKEN").or(file.dev_auth_token),
        };

        // Without an explicit flag, holding a credential is what makes you the owner.
        let is_owner = match env("GALLERY_OWNER") {
            Some(value) => parse_flag(&value)?,
            None => file
                .is_owner
                .unwrap_or_else(|| auth_token.as_deref().is_some_and(|t| !t.trim().is_empty())),
        };

        debug!("Resolved {:?} mode, owner = {}", mode, is_owner);

        let mut config = Self::new(&api_base, is_owner, auth_token)?;
        if let Some(heading) = file.heading {
            config.heading = heading;
        }
        if let Some(tagline) = file.tagline {
            config.tagline = tagline;
        }
        Ok(config)
    }

    /// Headers for mutating requests: a bearer token in owner mode, otherwise nothing.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !self.is_owner {
            return headers;
        }

        if let Some(token) = &self.auth_token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => warn!("Auth token is not a valid header value: {}", e),
            }
        }
        headers
    }

    /// Full URL for an API path such as `/api/artworks`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Absolute URLs are kept, anything else is served relative to the API base
    pub fn resolve_image_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.endpoint(url)
        }
    }
}

fn normalize_base(api_base: &str) -> Result<String> {
    let trimmed = api_base.trim().trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| GalleryError::Config(format!("invalid API base '{}': {}", api_base, e)))?;
    Ok(trimmed.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(GalleryError::Config(format!("GALLERY_OWNER must be a boolean, got '{}'", other))),
    }
}
