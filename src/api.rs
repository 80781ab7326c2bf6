/// HTTP client for the gallery API
///
/// Three calls make up the whole contract:
/// - `GET    /api/artworks`       list, no auth
/// - `POST   /api/upload`         multipart upload, bearer auth in owner mode
/// - `DELETE /api/artworks/{id}`  delete, bearer auth in owner mode
///
/// Preview images are plain GETs against each artwork's resolved URL.
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::state::{Artwork, ArtworkId, UploadRequest};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<GalleryConfig>,
}

impl ApiClient {
    pub fn new(config: GalleryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pixel-gallery/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Fetch the artwork list. A payload that is not a JSON array counts as empty,
    /// and malformed records are skipped.
    pub async fn list_artworks(&self) -> Result<Vec<Artwork>> {
        let url = self.config.endpoint("/api/artworks");
        debug!("GET {}", url);

        let res = self.http.get(&url).send().await?;
        let payload: Value = ensure_success(res).await?.json().await?;

        match payload {
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<Artwork>(item) {
                    Ok(artwork) => Some(artwork),
                    Err(e) => {
                        warn!("Skipping artwork #{} in list: {}", index, e);
                        None
                    }
                })
                .collect()),
            other => {
                warn!("Artwork list is not a sequence, treating as empty: {}", other);
                Ok(Vec::new())
            }
        }
    }

    /// Upload one artwork as `multipart/form-data`.
    ///
    /// The image is read from disk here and its MIME type sniffed from the bytes.
    pub async fn upload(&self, request: UploadRequest) -> Result<()> {
        let bytes = tokio::fs::read(&request.image.path).await?;
        let format = image::guess_format(&bytes)
            .map_err(|_| GalleryError::UnsupportedImage(request.image.file_name.clone()))?;

        info!(
            "⬆️  Uploading '{}' ({}, {}KB)",
            request.title,
            format.to_mime_type(),
            bytes.len() / 1024
        );

        let part = Part::bytes(bytes)
            .file_name(request.image.file_name.clone())
            .mime_str(format.to_mime_type())?;
        let form = Form::new()
            .part("image", part)
            .text("title", request.title)
            .text("description", request.description);

        let res = self
            .http
            .post(self.config.endpoint("/api/upload"))
            .headers(self.config.auth_headers())
            .multipart(form)
            .send()
            .await?;

        // The body only has to be JSON; its contents are not used.
        let _: Value = ensure_success(res).await?.json().await?;
        Ok(())
    }

    /// Delete one artwork. Succeeds only if the server answers with a truthy `success`.
    pub async fn delete_artwork(&self, id: &ArtworkId) -> Result<()> {
        let mut url = Url::parse(&self.config.endpoint("/api/artworks"))
            .map_err(|e| GalleryError::Config(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GalleryError::Config(format!("cannot append to {}", self.config.api_base)))?
            .push(&id.to_string());

        debug!("DELETE {}", url);

        let res = self
            .http
            .delete(url)
            .headers(self.config.auth_headers())
            .send()
            .await?;
        let payload: Value = ensure_success(res).await?.json().await?;

        if is_truthy(payload.get("success")) {
            Ok(())
        } else {
            Err(GalleryError::Rejected)
        }
    }

    /// Download the raw bytes of an artwork image
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let res = self.http.get(url).send().await?;
        let bytes = ensure_success(res).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Turn a non-2xx response into `GalleryError::Status`
async fn ensure_success(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(GalleryError::Status {
        status: status.as_u16(),
        body,
    })
}

/// JSON truthiness: false, null, 0, "" and a missing field are all false
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
