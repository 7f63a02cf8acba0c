//! Image-upload collaborator.
//!
//! Restaurant logos and backgrounds arrive either as ready URLs or as raw
//! image payloads (typically base64 data URIs). Raw payloads are handed to an
//! external upload service which answers with the public URL to store.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use models::validate::is_http_url;

pub const LOGO_FOLDER: &str = "/logos";
pub const BACKGROUND_FOLDER: &str = "/backgrounds";

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `image` under `folder` and return the URL to store on the row.
    async fn save(&self, image: &str, folder: &str) -> Result<String, ServiceError>;
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    image: &'a str,
    folder: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// reqwest-backed [`ImageStore`] posting `{image, folder}` to `{base_url}{path_prefix}`.
#[derive(Clone)]
pub struct HttpImageStore {
    client: Client,
    base_url: Option<String>,
    path_prefix: String,
}

impl HttpImageStore {
    pub fn new(base_url: Option<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            path_prefix: path_prefix.into(),
        }
    }

    pub fn from_config(cfg: &configs::ImageConfig) -> Self {
        Self::new(cfg.base_url.clone(), cfg.path_prefix.clone())
    }

    fn endpoint(&self) -> Option<String> {
        self.base_url.as_ref().map(|b| format!("{}{}", b, self.path_prefix))
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    #[instrument(skip(self, image), fields(folder = %folder, len = image.len()))]
    async fn save(&self, image: &str, folder: &str) -> Result<String, ServiceError> {
        if is_http_url(image) {
            return Ok(image.to_string());
        }
        let Some(endpoint) = self.endpoint() else {
            return Err(ServiceError::validation("Image must be an http(s) URL; no upload service configured"));
        };

        let response = self
            .client
            .post(&endpoint)
            .json(&UploadRequest { image, folder })
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("image upload failed: {e}")))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "image_upload_rejected");
            return Err(ServiceError::Upstream(format!("image upload failed: HTTP {}", response.status())));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("image upload response invalid: {e}")))?;
        info!(url = %body.url, "image_uploaded");
        Ok(body.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn urls_pass_through_without_upload() {
        let store = HttpImageStore::new(None, "/upload");
        let url = store.save("https://cdn.example.com/logo.png", LOGO_FOLDER).await.unwrap();
        assert_eq!(url, "https://cdn.example.com/logo.png");
    }

    #[tokio::test]
    async fn raw_payload_without_service_is_rejected() {
        let store = HttpImageStore::new(None, "/upload");
        let err = store.save("data:image/png;base64,AAAA", LOGO_FOLDER).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn endpoint_joins_base_and_prefix() {
        let store = HttpImageStore::new(Some("http://images.local/".into()), "/api/upload");
        assert_eq!(store.endpoint().as_deref(), Some("http://images.local/api/upload"));
    }
}
