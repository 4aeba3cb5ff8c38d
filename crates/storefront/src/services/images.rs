//! Image hosting client.
//!
//! Uploads product images to the hosted image API: a form POST with the
//! base64-encoded payload and the API key, answered with a public URL.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::ImageHostConfig;

/// Errors that can occur when uploading an image.
#[derive(Debug, Error)]
pub enum ImageUploadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The image host did not accept the upload.
    #[error("image upload was rejected")]
    Rejected,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
}

/// Client for the hosted image API.
///
/// Cheaply cloneable; all clones share one HTTP connection pool.
#[derive(Clone)]
pub struct ImageHostClient {
    inner: Arc<ImageHostClientInner>,
}

struct ImageHostClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ImageHostClient {
    /// Create a new image host client.
    #[must_use]
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            inner: Arc::new(ImageHostClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                api_key: config.api_key.expose_secret().to_owned(),
            }),
        }
    }

    /// Upload raw image bytes and return the public URL.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the host reports failure or omits the URL, or
    /// an error if the request fails.
    #[instrument(skip(self, image), fields(size = image.len()))]
    pub async fn upload(&self, image: &[u8]) -> Result<String, ImageUploadError> {
        let encoded = BASE64.encode(image);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .form(&[
                ("image", encoded.as_str()),
                ("key", self.inner.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response.json().await?;

        match body {
            UploadResponse {
                success: true,
                data: Some(data),
            } => Ok(data.url),
            _ => {
                tracing::warn!("image host reported failure");
                Err(ImageUploadError::Rejected)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_success_response() {
        let json = r#"{"success": true, "data": {"url": "https://img.example/x.jpg"}}"#;
        let body: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(body.success);
        assert_eq!(body.data.unwrap().url, "https://img.example/x.jpg");
    }

    #[test]
    fn test_deserialize_failure_response() {
        let json = r#"{"success": false, "data": null}"#;
        let body: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(!body.success);
        assert!(body.data.is_none());
    }
}
